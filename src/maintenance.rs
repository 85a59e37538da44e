//! Maintenance Job
//!
//! Deletes tiles whose target date lies more than the retention window in
//! the past. Stateless and idempotent; safe to run alongside regular traffic.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::config::RETENTION_WINDOW_DAYS;
use crate::error::{Result, TileError};
use crate::store::TileStore;

/// Checks an `Authorization` header value against the configured secret.
///
/// With no secret configured every request is rejected.
pub fn authorize(header: Option<&str>, secret: Option<&str>) -> Result<()> {
    let token = header.and_then(|h| h.strip_prefix("Bearer "));
    match (token, secret) {
        (Some(token), Some(secret)) if constant_time_eq(token.as_bytes(), secret.as_bytes()) => {
            Ok(())
        }
        _ => Err(TileError::Unauthorized),
    }
}

/// Byte comparison whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Oldest target date that survives a run at `now`.
pub fn cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(RETENTION_WINDOW_DAYS)
}

/// Runs one cleanup pass and returns the number of deleted tiles.
pub async fn run(store: &dyn TileStore, now: DateTime<Utc>) -> Result<u64> {
    let cutoff = cutoff(now);
    let deleted = store.delete_target_before(cutoff).await?;

    info!(
        "Maintenance: deleted {} tiles with target date before {}",
        deleted,
        cutoff.to_rfc3339()
    );
    Ok(deleted)
}
