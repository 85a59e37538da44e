//! Error types for the board server
//!
//! Maps every failure a request can hit onto an HTTP status and a
//! `{"message": ...}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::MessageResponse;
use crate::store::StoreError;
use crate::validation::ValidationError;

// == Tile Error Enum ==
/// Unified error type for tile operations.
#[derive(Error, Debug)]
pub enum TileError {
    /// Client-correctable input problem
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or mismatched bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Tile does not exist
    #[error("Tile not found")]
    NotFound,

    /// Grid cell already occupied
    #[error("Coordinates already taken")]
    CoordinateConflict,

    /// Store failure; the detail is logged, never returned
    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl From<ValidationError> for TileError {
    fn from(err: ValidationError) -> Self {
        TileError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for TileError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => TileError::CoordinateConflict,
            StoreError::NotFound => TileError::NotFound,
            StoreError::Other(detail) => TileError::StoreFailure(detail),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for TileError {
    fn into_response(self) -> Response {
        let status = match &self {
            TileError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TileError::Unauthorized => StatusCode::UNAUTHORIZED,
            TileError::NotFound => StatusCode::NOT_FOUND,
            TileError::CoordinateConflict => StatusCode::CONFLICT,
            TileError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            TileError::StoreFailure(detail) => {
                error!("Store failure: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for tile operations.
pub type Result<T> = std::result::Result<T, TileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (TileError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (TileError::Unauthorized, StatusCode::UNAUTHORIZED),
            (TileError::NotFound, StatusCode::NOT_FOUND),
            (TileError::CoordinateConflict, StatusCode::CONFLICT),
            (
                TileError::StoreFailure("pool timed out".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_store_failure_hides_detail() {
        let response = TileError::StoreFailure("relation dday_tiles missing".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(body.contains("Internal server error"));
        assert!(!body.contains("dday_tiles"));
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            TileError::from(StoreError::Conflict),
            TileError::CoordinateConflict
        ));
        assert!(matches!(
            TileError::from(StoreError::NotFound),
            TileError::NotFound
        ));
        assert!(matches!(
            TileError::from(StoreError::Other("x".into())),
            TileError::StoreFailure(_)
        ));
    }
}
