//! Expired Tile Cleanup Task
//!
//! In-process trigger for the maintenance job.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::maintenance;
use crate::store::TileStore;

/// Spawns a background task that periodically deletes expired tiles.
///
/// The first pass runs one full interval after spawning. Failures are
/// logged and the loop keeps going.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store: Arc<dyn TileStore> = Arc::new(MemoryTileStore::new());
/// let cleanup_handle = spawn_cleanup_task(store.clone(), 3600);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    store: Arc<dyn TileStore>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let period = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expired tile cleanup task with interval of {} seconds",
            period.as_secs()
        );

        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;

            match maintenance::run(&*store, Utc::now()).await {
                Ok(0) => debug!("Cleanup: no expired tiles found"),
                Ok(removed) => info!("Cleanup: removed {} expired tiles", removed),
                Err(err) => error!("Cleanup failed: {}", err),
            }
        }
    })
}
