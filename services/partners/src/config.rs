/// Partners service configuration loaded from environment variables.
#[derive(Debug)]
pub struct PartnersConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3115). Env var: `PARTNERS_PORT`.
    pub partners_port: u16,
}

impl PartnersConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            partners_port: std::env::var("PARTNERS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3115),
        }
    }
}
