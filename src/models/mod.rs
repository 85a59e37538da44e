//! Domain and transfer models for the board API
//!
//! `tile` holds the persisted entity and the store-facing value types;
//! `requests` and `responses` hold the HTTP DTOs.

pub mod requests;
pub mod responses;
pub mod tile;

// Re-export commonly used types
pub use requests::{CreateTileRequest, ListQuery, PageQuery};
pub use responses::{HealthResponse, MessageResponse, PageData, SharedTile};
pub use tile::{NewTile, Tile, TileFilter};
