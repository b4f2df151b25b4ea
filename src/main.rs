use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mealbot::bot::{self, EventProcessor};
use mealbot::config::Config;
use mealbot::platform::telegram::TelegramClient;
use mealbot::storage::SqliteMealStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mealbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  API: {}", config.telegram.api_url);
    info!("  Batch size: {}", config.telegram.batch_size);
    info!("  Database: {}", config.storage.database_path.display());

    let store = SqliteMealStore::open(&config.storage.database_path)?;
    let client = TelegramClient::new(&config.telegram.api_url, &config.telegram.bot_token)?;
    let processor = EventProcessor::new(client, store);

    info!("Bot is starting...");
    bot::run(
        processor,
        config.telegram.batch_size,
        config.telegram.poll_interval(),
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                // Without a signal handler the bot can only be stopped externally
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        },
    )
    .await?;

    Ok(())
}
