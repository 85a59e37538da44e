//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expired tile cleanup: runs the maintenance job at a configured interval
//!   when no external scheduler calls `/api/cron`

mod cleanup;

pub use cleanup::spawn_cleanup_task;
