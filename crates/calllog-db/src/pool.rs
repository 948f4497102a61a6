//! SQLite connection pool management
//!
//! Provides utilities for creating connection pools over the call log database.

use calllog_core::config::DatabaseConfig;
use calllog_core::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Create a connection pool from the database section of the app config
///
/// The pool is opened read-only unless `read_only` is turned off, and is
/// checked with a trivial query before being handed out.
///
/// # Example
///
/// ```no_run
/// use calllog_core::config::DatabaseConfig;
/// use calllog_db::create_pool_from_config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool_from_config(&DatabaseConfig::default()).await?;
///     Ok(())
/// }
/// ```
pub async fn create_pool_from_config(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options = parse_options(&config.url)?.read_only(config.read_only);

    info!(
        "Opening call log database (read_only={}, max_connections={})",
        config.read_only, config.max_connections
    );

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|e| {
            warn!("Failed to create database pool: {}", e);
            AppError::Pool(format!("Failed to open call log database: {}", e))
        })?;

    verify(&pool).await?;

    Ok(pool)
}

fn parse_options(database_url: &str) -> AppResult<SqliteConnectOptions> {
    SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Config(format!("Invalid database URL {}: {}", database_url, e)))
}

async fn verify(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;

    info!("Database connection verified");
    Ok(())
}
