//! API Module
//!
//! HTTP handlers and routing for the board REST API.
//!
//! # Endpoints
//! - `GET /api/tiles?since=` - List tiles inside the retention window
//! - `POST /api/tiles` - Create a tile
//! - `GET /api/tiles/:id` - Fetch one tile
//! - `POST /api/tiles/:id/like` - Like a tile
//! - `GET /api/cron` - Delete expired tiles (bearer token)
//! - `GET /page-data?tile=` - Shared tile for the rendered page
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
