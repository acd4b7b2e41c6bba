//! Clientele Server: Application entry point.

#![forbid(unsafe_code)]

use anyhow::Context;
use clientele_db::DbManager;
use clientele_server::{AppState, ServerConfig, build_router, init_logging};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ServerConfig::load().context("loading configuration")?;
    let state = AppState::new(DbManager::new(config.db_config()?));

    // Connect before accepting traffic so a bad connection string fails
    // the process instead of the first request.
    state
        .db()
        .ensure_connected()
        .await
        .context("connecting to the database")?;

    let listener = TcpListener::bind(config.bind_addr()?)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %listener.local_addr()?, "clientele-server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    info!("clientele-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
