//! Call Log Bridge Database Layer
//!
//! This crate provides SQLite access to a platform-shaped call log
//! database. It includes:
//!
//! - Connection pool management with sqlx
//! - The `CallLogProvider` implementation streaming rows newest first

pub mod pool;
pub mod repositories;

pub use pool::create_pool_from_config;
pub use repositories::*;

// Re-export commonly used types
pub use calllog_core::{AppError, AppResult};
pub use sqlx::{Sqlite, SqlitePool};
