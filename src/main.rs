use dotenvy::dotenv;
use item_pricing::{
    config::{database, items},
    core::average::average_price,
    errors::{Error, Result},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 4. Seed items from config.toml on an empty database
    let config = items::load_default_config()?;
    let seeded = items::seed_items(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed items: {}", e))?;
    info!("Startup complete, {} item(s) seeded", seeded);

    // 5. Report the current average price
    match average_price(&db).await {
        Ok(average) => info!("Average item price: {:.2}", average),
        Err(Error::EmptyAggregate) => warn!("No items stored yet, no average price to report"),
        Err(e) => return Err(e),
    }

    Ok(())
}
