//! Call Log Bridge Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the call log bridge. It includes:
//!
//! - Domain models (LogRecord, CallCategory, filters)
//! - The data source trait the query layer runs against
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
