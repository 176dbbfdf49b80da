//! Username Bot - Main Entry Point
//!
//! Loads the bot configuration, sets up logging and keeps the shared
//! username stores swept until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info};

use username_bot::config::{
    BotSettings, Configuration, DEFAULT_CONFIG_PATH, LogLevel, TelegramConfig,
};
use username_bot::logging;
use username_bot::store::{CleanupMessage, ResultCache, StoreCleanup, UsernameStore};

/// Telegram bot that finds free usernames.
#[derive(Parser, Debug)]
#[command(name = "username_bot")]
#[command(about = "Telegram username finder bot")]
#[command(version)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Override the configured log level (DEBUG, INFO, WARNING, ERROR, CRITICAL).
    #[arg(short, long)]
    log_level: Option<LogLevel>,

    /// Generate an example configuration file and exit.
    #[arg(long)]
    generate_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle example config generation
    if args.generate_config {
        return generate_example_config();
    }

    let config = Configuration::load_from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config))?;

    logging::init(&config.logging, args.log_level).context("Failed to initialize logging")?;

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let credentials = TelegramConfig::from_env()
        .context("Failed to load Telegram configuration from environment")?;
    let settings = BotSettings::from_env_with_defaults();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!(
        "Telegram API ID {} (session: {})",
        credentials.api_id, credentials.session_name
    );
    log_configuration(&config, &settings);

    let store = Arc::new(RwLock::new(UsernameStore::new(settings.username_ttl())));
    let results = Arc::new(RwLock::new(ResultCache::new(settings.result_cache_ttl())));

    // Spawn store cleanup task
    let (cleanup_tx, cleanup_rx) = mpsc::channel::<CleanupMessage>(8);
    let cleanup = StoreCleanup::new(
        Arc::clone(&store),
        Arc::clone(&results),
        settings.cleanup_interval(),
    );
    let cleanup_handle = tokio::spawn(async move {
        cleanup.run(cleanup_rx).await;
    });

    info!("Bot is running. Use Ctrl+C to stop.");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    info!("Received Ctrl+C, shutting down...");

    let _ = cleanup_tx.send(CleanupMessage::Shutdown).await;
    let _ = cleanup_handle.await;

    info!(
        "Final stats: {} stored usernames, {} cached check results",
        store.read().await.len(),
        results.read().await.len()
    );

    Ok(())
}

/// Logs the effective configuration at startup.
fn log_configuration(config: &Configuration, settings: &BotSettings) {
    let updates: Vec<&str> = config
        .bot
        .allowed_updates
        .iter()
        .map(|kind| kind.as_str())
        .collect();

    info!(
        "Bot: timeout {}s, {} workers, updates [{}]",
        config.bot.timeout,
        config.bot.workers,
        updates.join(", ")
    );
    info!(
        "Checker: batches of {} (max {} usernames), {} retries starting at {}s",
        config.checker.batch_size,
        config.checker.max_usernames,
        config.checker.max_retries,
        config.checker.retry_delay
    );
    info!(
        "Limits: {} concurrent users, {} generations per user",
        settings.max_users, settings.max_generations
    );
    info!(
        "Retention: usernames kept {}s, check results {}s, swept every {}s",
        settings.username_ttl_secs,
        settings.result_cache_ttl_secs,
        settings.cleanup_interval_secs
    );
}

/// Generates an example configuration file.
fn generate_example_config() -> Result<()> {
    let path = "config.example.yaml";
    Configuration::example().save_to_file(path)?;

    println!("✓ Example configuration written to: {path}");
    println!("\nTo use this bot:");
    println!("1. Copy {path} to {DEFAULT_CONFIG_PATH}");
    println!("2. Adjust the checker, bot and logging sections");
    println!("3. Create a .env file with API_ID, API_HASH and BOT_TOKEN");
    println!("4. Run: username_bot");

    Ok(())
}
