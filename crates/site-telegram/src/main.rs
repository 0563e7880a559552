//! Telegram subscription listener
//!
//! Run with:
//! ```bash
//! cargo run -p site-telegram --bin site-telegram-bot
//! ```
//!
//! The bot token comes from `TELEGRAM_BOT_TOKEN`, falling back to the active
//! site settings row.

use std::sync::atomic::AtomicI64;
use std::sync::Arc;

use anyhow::Context;
use site_common::{
    shutdown_channel, spawn_signal_watcher, try_init_tracing_with_config, AppConfig,
    TracingConfig,
};
use site_core::{SiteSettingsRepository, TelegramChatRepository};
use site_db::{connect, PgSiteSettingsRepository, PgTelegramChatRepository, PoolSettings};
use site_telegram::{BotClient, Listener, Supervisor};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let _guards = match try_init_tracing_with_config(TracingConfig::from_logging(
        &config.logging,
        config.app.env.is_production(),
    )) {
        Ok(guards) => Some(guards),
        Err(e) => {
            eprintln!("Warning: Failed to initialize tracing: {e}");
            None
        }
    };

    if let Err(e) = run(config).await {
        error!(error = %e, "Telegram bot failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting Telegram listener...");

    let pool = connect(&PoolSettings::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    ))
    .await
    .context("connecting to the database")?;

    let token = match config.telegram.bot_token.clone() {
        Some(token) => Some(token),
        None => PgSiteSettingsRepository::new(pool.clone())
            .find_active()
            .await
            .context("loading site settings")?
            .and_then(|settings| settings.telegram_bot_token)
            .filter(|token| !token.trim().is_empty()),
    };
    let Some(token) = token else {
        warn!("No Telegram bot token configured; nothing to do");
        return Ok(());
    };

    let client = BotClient::new(token, &config.telegram.api_base)?;
    let chats: Arc<dyn TelegramChatRepository> = Arc::new(PgTelegramChatRepository::new(pool));

    let (tx, rx) = shutdown_channel();
    spawn_signal_watcher(tx);

    let offset = Arc::new(AtomicI64::new(0));
    let mut supervisor = Supervisor::default();
    let started = supervisor
        .run(rx, |shutdown| {
            let mut listener = Listener::new(client.clone(), chats.clone())
                .with_shared_offset(offset.clone());
            async move { listener.run(shutdown).await }
        })
        .await;

    if !started {
        anyhow::bail!("another Telegram listener is already running");
    }
    Ok(())
}
