//! Tile entity and store-facing value types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Tile ==
/// A countdown event occupying one cell of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tile {
    pub id: Uuid,
    pub title: String,
    pub target_date: DateTime<Utc>,
    pub coord_x: i32,
    pub coord_y: i32,
    pub color: String,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == New Tile ==
/// Validated fields for a tile that has not been persisted yet.
///
/// Only the validation module builds these from client input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTile {
    pub title: String,
    pub target_date: DateTime<Utc>,
    pub coord_x: i32,
    pub coord_y: i32,
    pub color: String,
}

// == Tile Filter ==
/// Predicates for listing tiles. `None` means the predicate is not applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileFilter {
    /// Keep tiles whose `target_date >= bound`
    pub target_on_or_after: Option<DateTime<Utc>>,
    /// Keep tiles whose `updated_at > bound`
    pub updated_after: Option<DateTime<Utc>>,
}

impl TileFilter {
    /// Returns true when the tile satisfies every set predicate.
    pub fn matches(&self, tile: &Tile) -> bool {
        let in_window = self
            .target_on_or_after
            .map_or(true, |bound| tile.target_date >= bound);
        let changed = self
            .updated_after
            .map_or(true, |bound| tile.updated_at > bound);
        in_window && changed
    }
}
