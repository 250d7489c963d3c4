use sea_orm_migration::prelude::*;

use troth_partners_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
