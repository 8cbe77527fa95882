//! # Intake - employee records behind reCAPTCHA
//!
//! Accepts employee submissions from a browser form, verifies the attached
//! reCAPTCHA token with Google, and only then stores the record.
//!
//! ## Architecture
//! ```text
//! Browser → Intake → siteverify (Google)
//!              ↓
//!       Employee Store (memory | Redis)
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod intake;
mod recaptcha;
mod routes;
mod state;
mod store;

use config::{AppConfig, StoreBackend};
use state::AppState;

/// Employee intake service
#[derive(Parser, Debug)]
#[command(name = "intake")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/intake.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Employee store backend (overrides config)
    #[arg(long, env = "STORE_BACKEND", value_enum)]
    store: Option<StoreBackend>,

    /// Redis URL (overrides config)
    #[arg(long, env = "REDIS_URL")]
    redis_url: Option<String>,

    /// reCAPTCHA secret key (overrides config)
    #[arg(long, env = "RECAPTCHA_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// reCAPTCHA site key (overrides config)
    #[arg(long, env = "RECAPTCHA_SITE_KEY")]
    site_key: Option<String>,

    /// Minimum accepted reCAPTCHA score, 0.0 - 1.0 (overrides config)
    #[arg(long, env = "RECAPTCHA_THRESHOLD")]
    threshold: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may come from a local .env file
    let dotenv = dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!("Starting employee intake v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    // Load configuration
    let config = AppConfig::load(&args.config, &args)?;
    info!(
        store = ?config.store,
        threshold = config.recaptcha.threshold,
        expected_action = ?config.recaptcha.expected_action(),
        "Configuration loaded from {}",
        args.config
    );

    let listen_addr = config.listen_addr.clone();

    // Initialize application state
    let state = AppState::new(config).await?;

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;
    info!("Intake listening on {}", listen_addr);

    // Handle graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("Intake shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
