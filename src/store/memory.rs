//! In-memory tile store
//!
//! HashMap storage behind a single RwLock; every mutation happens under the
//! write lock, which gives the same atomicity a database would.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, StoreResult, TileStore};
use crate::models::{NewTile, Tile, TileFilter};

// == Memory Tile Store ==
/// Tile store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryTileStore {
    tiles: RwLock<HashMap<Uuid, Tile>>,
}

impl MemoryTileStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed tile as-is, bypassing coordinate checks.
    ///
    /// Lets tests seed tiles with past target dates or chosen timestamps.
    pub async fn insert_raw(&self, tile: Tile) {
        self.tiles.write().await.insert(tile.id, tile);
    }

    /// Number of stored tiles.
    pub async fn len(&self) -> usize {
        self.tiles.read().await.len()
    }

    /// Returns true if no tiles are stored.
    pub async fn is_empty(&self) -> bool {
        self.tiles.read().await.is_empty()
    }
}

#[async_trait]
impl TileStore for MemoryTileStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Tile>> {
        Ok(self.tiles.read().await.get(&id).cloned())
    }

    async fn find_many(&self, filter: TileFilter) -> StoreResult<Vec<Tile>> {
        let tiles = self.tiles.read().await;
        let mut matched: Vec<Tile> = tiles
            .values()
            .filter(|tile| filter.matches(tile))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matched)
    }

    async fn create(&self, tile: NewTile) -> StoreResult<Tile> {
        let mut tiles = self.tiles.write().await;

        let occupied = tiles
            .values()
            .any(|t| t.coord_x == tile.coord_x && t.coord_y == tile.coord_y);
        if occupied {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let created = Tile {
            id: Uuid::new_v4(),
            title: tile.title,
            target_date: tile.target_date,
            coord_x: tile.coord_x,
            coord_y: tile.coord_y,
            color: tile.color,
            likes: 0,
            created_at: now,
            updated_at: now,
        };
        tiles.insert(created.id, created.clone());

        Ok(created)
    }

    async fn increment_likes(&self, id: Uuid) -> StoreResult<Tile> {
        let mut tiles = self.tiles.write().await;
        let tile = tiles.get_mut(&id).ok_or(StoreError::NotFound)?;

        tile.likes = tile.likes.saturating_add(1);
        tile.updated_at = Utc::now();

        Ok(tile.clone())
    }

    async fn delete_target_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let mut tiles = self.tiles.write().await;
        let before = tiles.len();
        tiles.retain(|_, tile| tile.target_date >= cutoff);

        Ok((before - tiles.len()) as u64)
    }
}
