//! Bunny Rewards daemon
//!
//! Headless entry point that polls the BunnySteps API for the signed-in user,
//! presents rewards through the log, and runs the coin milestone check.

use std::sync::Arc;

use clap::Parser;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use bunny_client::ApiClient;
use bunny_core::config::AppConfig;
use bunny_core::error::AppError;
use bunny_rewards::RewardSession;
use bunny_rewards::presentation::LoggingPresenter;

/// Bunny Rewards: reward dispatch for BunnySteps
#[derive(Debug, Parser)]
#[command(name = "bunny-rewards-daemon", version, about, long_about = None)]
struct Cli {
    /// Configuration environment (loads config/<env>.toml). Defaults to $BUNNY_ENV or "development"
    #[arg(short, long)]
    env: Option<String>,

    /// Poll once, run the milestone check, wait for the queue to drain, then exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env = cli
        .env
        .clone()
        .or_else(|| std::env::var("BUNNY_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Configuration loaded (env: {})", env);

    if let Err(e) = run(config, cli.once).await {
        tracing::error!("Reward daemon error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig, once: bool) -> Result<(), AppError> {
    tracing::info!("Starting Bunny Rewards v{}", env!("CARGO_PKG_VERSION"));

    if config.client.token.is_none() {
        tracing::warn!("No API token configured; set BUNNY__CLIENT__TOKEN");
    }

    let api = Arc::new(ApiClient::new(
        &config.client,
        config.notifications.fetch_limit,
    )?);
    tracing::info!("API client ready ({})", config.client.base_url);

    let session = RewardSession::start(
        &config,
        api.clone(),
        api,
        Arc::new(LoggingPresenter),
    )
    .await?;

    if once {
        let enqueued = session.poll_now().await;
        let milestone = session.check_milestone().await;
        tracing::info!(
            "Single pass: {} rewards from notifications, milestone {}",
            enqueued,
            if milestone.is_some() { "reached" } else { "not reached" }
        );
        session.scheduler().wait_until_drained().await;
    } else {
        session.spawn_background();
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
    }

    session.stop().await;
    tracing::info!("Bunny Rewards stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
