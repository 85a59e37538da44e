//! Tile Service
//!
//! Validation plus a single store call per operation. Holds no state besides
//! the injected store handle.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::RETENTION_WINDOW_DAYS;
use crate::error::{Result, TileError};
use crate::models::{CreateTileRequest, Tile, TileFilter};
use crate::store::TileStore;
use crate::validation::{parse_timestamp, validate_new_tile};

// == Tile Service ==
/// Create/read/list/like operations over an injected tile store.
#[derive(Clone)]
pub struct TileService {
    store: Arc<dyn TileStore>,
}

impl TileService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn TileStore>) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<dyn TileStore> {
        &self.store
    }

    // == Create ==
    /// Validates the request and persists a new tile with zero likes.
    pub async fn create(&self, req: &CreateTileRequest) -> Result<Tile> {
        let new_tile = validate_new_tile(req, Utc::now())?;
        let tile = self.store.create(new_tile).await?;

        info!(
            "Created tile {} at ({}, {})",
            tile.id, tile.coord_x, tile.coord_y
        );
        Ok(tile)
    }

    // == Get ==
    /// Looks up a tile by id.
    pub async fn get(&self, id: &str) -> Result<Tile> {
        let id = parse_id(id)?;
        self.store.find_by_id(id).await?.ok_or(TileError::NotFound)
    }

    // == List ==
    /// Returns tiles still inside the retention window, optionally only
    /// those updated after `since`. A malformed `since` is ignored.
    pub async fn list(&self, since: Option<&str>) -> Result<Vec<Tile>> {
        let updated_after = since.and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                debug!("Ignoring malformed since parameter: {:?}", raw);
            }
            parsed
        });

        let filter = TileFilter {
            target_on_or_after: Some(Utc::now() - Duration::days(RETENTION_WINDOW_DAYS)),
            updated_after,
        };

        Ok(self.store.find_many(filter).await?)
    }

    // == Like ==
    /// Adds one like to the tile.
    pub async fn like(&self, id: &str) -> Result<Tile> {
        let id = parse_id(id)?;
        Ok(self.store.increment_likes(id).await?)
    }
}

/// Blank ids are a client error; anything that is not a UUID cannot exist.
fn parse_id(raw: &str) -> Result<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TileError::InvalidInput("Tile ID is required".to_string()));
    }
    Uuid::parse_str(raw).map_err(|_| TileError::NotFound)
}
