//! Repository implementations
//!
//! Concrete implementations of the data source traits defined in
//! calllog-core, using sqlx for SQLite access.

pub mod call_log_repo;

pub use call_log_repo::{SqliteCallLogProvider, CALLS_TABLE};
