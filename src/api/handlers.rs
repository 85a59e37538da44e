//! API Handlers
//!
//! HTTP request handlers for each board endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use tracing::warn;

use crate::config::Config;
use crate::error::{Result, TileError};
use crate::maintenance;
use crate::models::{
    CreateTileRequest, HealthResponse, ListQuery, MessageResponse, PageData, PageQuery, Tile,
};
use crate::page;
use crate::service::TileService;
use crate::store::{MemoryTileStore, TileStore};

/// Application state shared across all handlers.
///
/// Holds the service (and through it the injected store) plus the cron
/// secret. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Tile operations
    pub service: TileService,
    /// Bearer secret for the cron endpoint
    pub cron_secret: Option<Arc<str>>,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(store: Arc<dyn TileStore>, cron_secret: Option<String>) -> Self {
        Self {
            service: TileService::new(store),
            cron_secret: cron_secret.map(Arc::from),
        }
    }

    /// Creates an AppState backed by a fresh in-memory store.
    pub fn in_memory(config: &Config) -> Self {
        Self::new(Arc::new(MemoryTileStore::new()), config.cron_secret.clone())
    }
}

/// Handler for GET /api/tiles
///
/// Lists tiles inside the retention window, optionally only those updated
/// after `since`.
pub async fn list_tiles_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Tile>>> {
    let tiles = state.service.list(query.since.as_deref()).await?;
    Ok(Json(tiles))
}

/// Handler for POST /api/tiles
///
/// Validates and stores a new tile; 201 with the created tile.
///
/// The body is parsed as JSON whatever the `Content-Type` says, so plain
/// `fetch` calls sending `text/plain` still work.
pub async fn create_tile_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Tile>)> {
    let req: CreateTileRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!("Rejected tile body: {}", err);
        TileError::InvalidInput("Invalid request body".to_string())
    })?;

    let tile = state.service.create(&req).await?;
    Ok((StatusCode::CREATED, Json(tile)))
}

/// Handler for GET /api/tiles/:id
pub async fn get_tile_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tile>> {
    let tile = state.service.get(&id).await?;
    Ok(Json(tile))
}

/// Handler for POST /api/tiles/:id/like
pub async fn like_tile_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tile>> {
    let tile = state.service.like(&id).await?;
    Ok(Json(tile))
}

/// Handler for GET /api/cron
///
/// Requires `Authorization: Bearer <secret>`; deletes expired tiles.
pub async fn cron_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    maintenance::authorize(header, state.cron_secret.as_deref())?;

    let deleted = maintenance::run(&**state.service.store(), Utc::now()).await?;
    Ok(Json(MessageResponse::deleted(deleted)))
}

/// Handler for GET /page-data
///
/// Always 200; a missing or failing tile becomes `sharedTile: null`.
pub async fn page_data_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<PageData> {
    Json(page::load_shared_tile(&state.service, query.tile.as_deref()).await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_state() -> AppState {
        AppState::new(Arc::new(MemoryTileStore::new()), Some("s3cret".to_string()))
    }

    fn create_body(x: i64, y: i64) -> Bytes {
        let body = serde_json::json!({
            "title": "Concert",
            "target_date": (Utc::now() + Duration::days(10)).to_rfc3339(),
            "coord_x": x,
            "coord_y": y,
            "color": "#00ff00",
        });
        Bytes::from(body.to_string())
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = test_state();

        let (status, Json(created)) =
            create_tile_handler(State(state.clone()), create_body(1, 1))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(fetched) = get_tile_handler(State(state), Path(created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_like_handler() {
        let state = test_state();
        let (_, Json(created)) =
            create_tile_handler(State(state.clone()), create_body(2, 2))
                .await
                .unwrap();

        let Json(liked) = like_tile_handler(State(state), Path(created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(liked.likes, 1);
    }

    #[tokio::test]
    async fn test_create_handler_rejects_malformed_body() {
        let result =
            create_tile_handler(State(test_state()), Bytes::from_static(b"{\"title\"")).await;
        assert!(matches!(
            result,
            Err(TileError::InvalidInput(msg)) if msg == "Invalid request body"
        ));

        let result = create_tile_handler(State(test_state()), Bytes::new()).await;
        assert!(matches!(result, Err(TileError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_cron_handler_requires_token() {
        let state = test_state();

        let result = cron_handler(State(state.clone()), HeaderMap::new()).await;
        assert!(matches!(result, Err(TileError::Unauthorized)));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer s3cret".parse().unwrap());
        let Json(body) = cron_handler(State(state), headers).await.unwrap();
        assert_eq!(body.message, "Successfully deleted 0 old tiles.");
    }

    #[tokio::test]
    async fn test_list_handler_empty() {
        let Json(tiles) = list_tiles_handler(State(test_state()), Query(ListQuery::default()))
            .await
            .unwrap();
        assert!(tiles.is_empty());
    }

    #[tokio::test]
    async fn test_page_data_handler_missing() {
        let Json(data) = page_data_handler(
            State(test_state()),
            Query(PageQuery {
                tile: Some("missing".to_string()),
            }),
        )
        .await;
        assert!(data.shared_tile.is_none());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
