//! Tile persistence
//!
//! `TileStore` is the capability the service layer is written against.
//! Implementations report outcomes through `StoreError` so callers never
//! inspect backend-specific error codes.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewTile, Tile, TileFilter};

pub use memory::MemoryTileStore;
pub use postgres::PgTileStore;

// == Store Error ==
/// Structured outcome of a failed store call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another tile already holds the coordinate pair
    #[error("coordinate pair already occupied")]
    Conflict,

    /// No row matched the id
    #[error("record not found")]
    NotFound,

    /// Anything else (connection, schema, decoding)
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Tile Store ==
/// Persistence capability for tiles.
///
/// Coordinate uniqueness and like increments must be atomic in the backend;
/// callers do no locking of their own.
#[async_trait]
pub trait TileStore: Send + Sync {
    /// Looks up a tile by id.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Tile>>;

    /// Returns every tile matching `filter`.
    async fn find_many(&self, filter: TileFilter) -> StoreResult<Vec<Tile>>;

    /// Persists a new tile with zero likes and server-assigned timestamps.
    ///
    /// Fails with `Conflict` when the coordinate pair is taken.
    async fn create(&self, tile: NewTile) -> StoreResult<Tile>;

    /// Adds one like and bumps `updated_at`.
    ///
    /// Fails with `NotFound` when the tile does not exist.
    async fn increment_likes(&self, id: Uuid) -> StoreResult<Tile>;

    /// Deletes tiles whose target date is strictly before `cutoff`.
    async fn delete_target_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64>;
}
