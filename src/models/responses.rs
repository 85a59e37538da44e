//! Response DTOs for the board API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::Tile;

/// Body carrying a single human-readable message.
///
/// Used for every error and for the cron summary.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a new MessageResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Summary returned by the maintenance job
    pub fn deleted(count: u64) -> Self {
        Self::new(format!("Successfully deleted {} old tiles.", count))
    }
}

/// Plain projection of a tile handed to the page renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedTile {
    pub id: String,
    pub title: String,
    pub target_date: String,
    pub coord_x: i32,
    pub coord_y: i32,
    pub color: String,
    pub likes: i32,
    pub created_at: String,
}

impl From<&Tile> for SharedTile {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id.to_string(),
            title: tile.title.clone(),
            target_date: iso_string(&tile.target_date),
            coord_x: tile.coord_x,
            coord_y: tile.coord_y,
            color: tile.color.clone(),
            likes: tile.likes,
            created_at: iso_string(&tile.created_at),
        }
    }
}

/// Data exposed to the server-rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub shared_tile: Option<SharedTile>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// UTC, millisecond precision, `Z` suffix.
fn iso_string(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
