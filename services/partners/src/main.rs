use sea_orm::Database;
use tracing::info;

use troth_partners::config::PartnersConfig;
use troth_partners::router::build_router;
use troth_partners::state::AppState;

#[tokio::main]
async fn main() {
    troth_core::tracing::init_tracing();

    let config = PartnersConfig::from_env();

    // Single initialization point for the database client; everything else
    // receives it through AppState.
    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.partners_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("partners service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
