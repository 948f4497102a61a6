//! Data source abstraction
//!
//! Defines the seam between the query layer and the platform call log.

use crate::error::AppError;
use crate::models::RawCallRow;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Forward-only stream of raw rows, newest first.
///
/// Dropping the stream releases the underlying cursor.
pub type RowStream = BoxStream<'static, Result<RawCallRow, AppError>>;

/// Selection predicate with its bound parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// WHERE predicate using `?` placeholders; `None` matches every row
    pub clause: Option<String>,

    /// Values bound to the placeholders, in order
    pub args: Vec<String>,
}

impl Selection {
    /// Selection matching every row
    pub fn all() -> Self {
        Self::default()
    }
}

/// Platform call log provider
///
/// Implementations query with a fixed column projection and a fixed
/// `date DESC` ordering.
#[async_trait]
pub trait CallLogProvider: Send + Sync {
    /// Run a query and return a cursor over the matching rows.
    ///
    /// `Ok(None)` means the provider produced no cursor at all.
    async fn query(&self, selection: &Selection) -> Result<Option<RowStream>, AppError>;
}
