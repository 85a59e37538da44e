//! API Routes
//!
//! Configures the Axum router with all board endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_tile_handler, cron_handler, get_tile_handler, health_handler, like_tile_handler,
    list_tiles_handler, page_data_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/tiles",
            get(list_tiles_handler).post(create_tile_handler),
        )
        .route("/api/tiles/:id", get(get_tile_handler))
        .route("/api/tiles/:id/like", post(like_tile_handler))
        .route("/api/cron", get(cron_handler))
        .route("/page-data", get(page_data_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
