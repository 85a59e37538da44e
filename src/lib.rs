//! D-Day Board - collaborative countdown tiles on a 60x60 grid
//!
//! Tiles carry a title, target date, color and like counter. Expired tiles
//! are removed by a maintenance job a week after their target date.

pub mod api;
pub mod config;
pub mod error;
pub mod maintenance;
pub mod models;
pub mod page;
pub mod service;
pub mod store;
pub mod tasks;
pub mod validation;

pub use api::AppState;
pub use config::Config;
pub use error::TileError;
pub use service::TileService;
pub use store::{MemoryTileStore, PgTileStore, TileStore};
pub use tasks::spawn_cleanup_task;
