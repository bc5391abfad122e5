use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(craftlink_link_migration::Migrator).await;
}
