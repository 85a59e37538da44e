//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

// == Board Constants ==
/// Width and height of the board in cells
pub const GRID_SIZE: i32 = 60;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 50;

/// Days a tile stays listed (and stored) after its target date.
/// Shared by the list window and the maintenance cutoff.
pub const RETENTION_WINDOW_DAYS: i64 = 7;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// PostgreSQL connection string; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// Maximum pooled database connections
    pub database_max_connections: u32,
    /// Shared secret expected in the cron endpoint's bearer token
    pub cron_secret: Option<String>,
    /// In-process maintenance interval in seconds, 0 disables it
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - PostgreSQL URL (default: unset, in-memory store)
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `CRON_SECRET` - Bearer secret for `/api/cron` (default: unset, always 401)
    /// - `CLEANUP_INTERVAL` - In-process cleanup frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: non_empty_var("DATABASE_URL"),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            cron_secret: non_empty_var("CRON_SECRET"),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: None,
            database_max_connections: 5,
            cron_secret: None,
            cleanup_interval: 0,
        }
    }
}
