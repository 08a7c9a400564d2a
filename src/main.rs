mod api;
mod app_state;
mod config;
mod core;
mod debug;
mod domain;
mod errors;
mod routes;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_state::build_app_state;
use crate::config::AppConfig;
use crate::core::persistence::logs::LOG_FILE_PREFIX;
use crate::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let _guard = init_tracing(&config);

    if config.debug_mode {
        return debug::run_debug(&config).await;
    }

    let app = app_router().with_state(build_app_state(&config));

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        data_dir = %config.data_dir.display(),
        utc_offset = %config.utc_offset,
        "🚀 vpnstats listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Stdout plus a daily rolling file; the guard flushes the file writer on drop.
fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
