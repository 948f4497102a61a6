//! Unified error handling for the call log bridge
//!
//! This module provides the error type shared by every layer, with
//! automatic HTTP response mapping and stable error codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Query Errors ====================
    #[error("{0}")]
    InvalidParameters(String),

    #[error("{0}")]
    Fetch(String),

    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    // ==================== Configuration Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::InvalidParameters(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidParameters(_) => "INVALID_PARAMETERS",
            AppError::Fetch(_) => "FETCH_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Pool(_) => "POOL_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Normalize a data source failure into a fetch error.
    ///
    /// The underlying message is kept verbatim. Parameter errors pass
    /// through untouched since they are raised before any query runs.
    pub fn into_fetch(self) -> Self {
        match self {
            AppError::InvalidParameters(_) | AppError::Fetch(_) => self,
            AppError::Database(msg) | AppError::Pool(msg) | AppError::Config(msg) => {
                AppError::Fetch(msg)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidParameters(err.to_string())
    }
}
