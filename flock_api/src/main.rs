//! Flock server entry point: load config, start the core, serve HTTP.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use flock_api::{build_router, AppState};
use flock_core::config::{self, FlockConfig, LogFormat};
use flock_core::FlockCore;

#[tokio::main]
async fn main() {
    let config = match config::get_or_init().await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` overrides the configured level.
fn init_logging(config: &FlockConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: FlockConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Flock v{}", env!("CARGO_PKG_VERSION"));

    let bind_addr = config.bind_addr.clone();
    let core = FlockCore::start(config)
        .await
        .context("failed to start core")?;

    let app = build_router(AppState::new(core.clone()));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shutting down");
    core.shutdown().await.context("failed to close database")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
