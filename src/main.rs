mod config;
mod error;
mod poller;
mod practicum;
mod state_machine;
mod status;
mod telegram;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::BotConfig;
use error::ConfigError;
use poller::{Poller, SystemClock};
use practicum::PracticumClient;
use state_machine::Cursor;
use telegram::{Notifier, TelegramClient};

#[tokio::main]
async fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_target(false)
        .init();

    let mut poller = match startup() {
        Ok(poller) => poller,
        Err(e) => {
            error!(error = %e, "startup failed, exiting");
            return Err(e).context("homework-bot could not start");
        }
    };

    poller.run(shutdown_signal()).await;
    Ok(())
}

/// `RUST_LOG` when it is set and parses, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn startup() -> Result<Poller<PracticumClient, TelegramClient>, ConfigError> {
    build_poller(&BotConfig::load()?)
}

/// Validate configuration and build the clients. Any failure here is fatal.
fn build_poller(config: &BotConfig) -> Result<Poller<PracticumClient, TelegramClient>, ConfigError> {
    config.validate()?;
    info!(?config, "configuration loaded");

    let source = PracticumClient::new(config.practicum_token.clone(), config.endpoint.clone())?;
    let sender = TelegramClient::new(
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
        config.telegram_api_url.clone(),
    )?;

    // Starting from 0 reports every homework the API knows about on launch.
    Ok(Poller::new(
        source,
        Notifier::new(sender),
        SystemClock,
        Cursor::new(0),
        config.retry_time(),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "could not listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
