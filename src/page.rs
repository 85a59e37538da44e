//! Page Loader
//!
//! Server-side lookup of a deep-linked tile. Never fails: any error
//! degrades to `sharedTile: null` so the page still renders.

use tracing::warn;

use crate::models::{PageData, SharedTile};
use crate::service::TileService;

/// Resolves the optional `tile` query parameter into page data.
pub async fn load_shared_tile(service: &TileService, tile_id: Option<&str>) -> PageData {
    let shared_tile = match tile_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => match service.get(id).await {
            Ok(tile) => Some(SharedTile::from(&tile)),
            Err(err) => {
                warn!("Failed to fetch shared tile {:?}: {}", id, err);
                None
            }
        },
        None => None,
    };

    PageData { shared_tile }
}
