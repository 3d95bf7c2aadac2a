use chrono::Utc;
use dotenvy::dotenv;
use finaid_ledger::{
    config::{database, media, seed},
    core::{period, seed::seed_from_config},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Seed configuration
    let seed_config = seed::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;

    // 4. Database and schema
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Periods and templates
    seed_from_config(&db, &seed_config).await?;

    let media_root = media::get_media_root();
    tokio::fs::create_dir_all(&media_root).await?;
    info!("Receipts stored under {}", media_root.display());

    let now = Utc::now();
    if period::is_open(&db, now).await? {
        info!("Financial aid applications are open");
    } else {
        info!("Financial aid applications are closed");
    }

    Ok(())
}
