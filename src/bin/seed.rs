use product_order_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    seed::seed_if_empty,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    if seed_if_empty(&orm).await? {
        println!("Seed completed");
    } else {
        println!("Seed skipped: database is not empty");
    }
    Ok(())
}
