//! Request DTOs for the board API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for tile creation (POST /api/tiles)
///
/// Every field is optional at the wire level so that missing fields are
/// reported by validation instead of by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTileRequest {
    #[serde(default)]
    pub title: Option<String>,
    /// ISO-8601 timestamp or date
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub coord_x: Option<i64>,
    #[serde(default)]
    pub coord_y: Option<i64>,
    /// `#RGB` or `#RRGGBB`
    #[serde(default)]
    pub color: Option<String>,
}

/// Query string for GET /api/tiles
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Only return tiles updated after this ISO-8601 instant
    pub since: Option<String>,
}

/// Query string for GET /page-data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Id of the tile shared through a deep link
    pub tile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r##"{"title":"Exam","target_date":"2026-11-01T09:00:00Z","coord_x":0,"coord_y":59,"color":"#fff"}"##;
        let req: CreateTileRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title.as_deref(), Some("Exam"));
        assert_eq!(req.coord_x, Some(0));
        assert_eq!(req.coord_y, Some(59));
        assert_eq!(req.color.as_deref(), Some("#fff"));
    }

    #[test]
    fn test_create_request_missing_fields() {
        let req: CreateTileRequest = serde_json::from_str(r#"{"title":"Exam"}"#).unwrap();
        assert!(req.target_date.is_none());
        assert!(req.coord_x.is_none());
        assert!(req.color.is_none());
    }

    #[test]
    fn test_create_request_null_coord() {
        let req: CreateTileRequest = serde_json::from_str(r#"{"coord_x":null}"#).unwrap();
        assert!(req.coord_x.is_none());
    }
}
