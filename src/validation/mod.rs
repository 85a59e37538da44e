//! Tile input validation
//!
//! Checks candidate fields in a fixed order and reports the first rule that
//! fails. Pure: the current time is passed in.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::config::{GRID_SIZE, MAX_TITLE_LENGTH};
use crate::models::{CreateTileRequest, NewTile};


// == Validation Error ==
/// One variant per rule, in the order the rules are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Title cannot exceed 50 characters")]
    TitleTooLong,

    #[error("Coordinates must be between 0 and 59")]
    CoordinatesOutOfRange,

    #[error("Invalid color format. Must be a hex color like #RRGGBB or #RGB.")]
    InvalidColor,

    #[error("Invalid target date")]
    InvalidDate,

    #[error("Target date must be in the future")]
    DateNotInFuture,

    #[error("Target date cannot be more than one year from now")]
    DateTooFar,
}

// == Validate ==
/// Validates a creation request against `now`.
///
/// Returns the normalized fields ready for the store on success.
pub fn validate_new_tile(
    req: &CreateTileRequest,
    now: DateTime<Utc>,
) -> Result<NewTile, ValidationError> {
    let (title, target_date, coord_x, coord_y, color) = match (
        present(&req.title),
        present(&req.target_date),
        req.coord_x,
        req.coord_y,
        present(&req.color),
    ) {
        (Some(t), Some(d), Some(x), Some(y), Some(c)) => (t, d, x, y, c),
        _ => return Err(ValidationError::MissingFields),
    };

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }

    let coord_x = grid_coord(coord_x).ok_or(ValidationError::CoordinatesOutOfRange)?;
    let coord_y = grid_coord(coord_y).ok_or(ValidationError::CoordinatesOutOfRange)?;

    if !is_hex_color(color) {
        return Err(ValidationError::InvalidColor);
    }

    let target_date = parse_timestamp(target_date).ok_or(ValidationError::InvalidDate)?;
    if target_date <= now {
        return Err(ValidationError::DateNotInFuture);
    }
    if target_date > one_year_after(now) {
        return Err(ValidationError::DateTooFar);
    }

    Ok(NewTile {
        title: title.to_string(),
        target_date,
        coord_x,
        coord_y,
        color: color.to_string(),
    })
}

/// Same calendar date and time one year later. Feb 29 rolls forward to
/// Mar 1 when the next year has no leap day.
pub fn one_year_after(now: DateTime<Utc>) -> DateTime<Utc> {
    let year = now.year() + 1;
    now.with_year(year)
        .or_else(|| {
            NaiveDate::from_ymd_opt(year, 3, 1).map(|date| date.and_time(now.time()).and_utc())
        })
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn grid_coord(value: i64) -> Option<i32> {
    i32::try_from(value)
        .ok()
        .filter(|v| (0..GRID_SIZE).contains(v))
}

/// `#RGB` or `#RRGGBB`, either case.
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Parses an ISO-8601 instant.
///
/// Accepts RFC 3339, a naive date-time (read as UTC) or a bare date (UTC
/// midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
