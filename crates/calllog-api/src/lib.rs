//! API layer for the call log bridge
//!
//! HTTP handlers exposing the call log entry points to the application layer.

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, LogFilterParams, NumberFilterParams};

// Re-export handler configuration
pub use handlers::configure_call_logs;
