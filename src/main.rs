//! D-Day Board server
//!
//! Serves the tile API and, when configured, runs the expired-tile cleanup
//! in process.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dday_board::api::create_router;
use dday_board::{spawn_cleanup_task, AppState, Config, MemoryTileStore, PgTileStore, TileStore};

/// Main entry point for the board server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the PostgreSQL store, or fall back to the in-memory store
/// 4. Start the cleanup task if an interval is configured
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dday_board=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting D-Day Board Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, database={}, cron_secret={}, cleanup_interval={}s",
        config.server_port,
        if config.database_url.is_some() { "postgres" } else { "memory" },
        if config.cron_secret.is_some() { "set" } else { "unset" },
        config.cleanup_interval
    );
    if config.cron_secret.is_none() {
        warn!("CRON_SECRET is not set, /api/cron will reject every request");
    }

    let store: Arc<dyn TileStore> = match &config.database_url {
        Some(url) => Arc::new(
            PgTileStore::connect(url, config.database_max_connections)
                .await
                .context("failed to connect to the database")?,
        ),
        None => {
            warn!("DATABASE_URL is not set, tiles are kept in memory only");
            Arc::new(MemoryTileStore::new())
        }
    };
    let state = AppState::new(store.clone(), config.cron_secret.clone());

    let cleanup_handle = if config.cleanup_interval > 0 {
        Some(spawn_cleanup_task(store, config.cleanup_interval))
    } else {
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
