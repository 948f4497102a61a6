//! Result projector
//!
//! Applies the query window to a newest-first row stream and maps each
//! retained row to a `LogRecord`.

use calllog_core::{
    models::{LogRecord, RawCallRow},
    AppResult,
};
use futures::{future, Stream, StreamExt, TryStreamExt};
use tracing::{debug, instrument};

use crate::filter_compiler::QueryWindow;

/// Project rows into records.
///
/// Skips `window.offset` rows, then collects at most `window.limit` rows.
/// The stream is polled once per row and never past the last collected
/// row. A missing stream projects to an empty list; an error anywhere in
/// the scanned range fails the whole projection.
#[instrument(skip(rows))]
pub async fn project_rows<S>(rows: Option<S>, window: QueryWindow) -> AppResult<Vec<LogRecord>>
where
    S: Stream<Item = AppResult<RawCallRow>>,
{
    let Some(rows) = rows else {
        debug!("No row source, empty projection");
        return Ok(Vec::new());
    };

    let mut to_skip = window.offset;

    rows.try_skip_while(move |_| {
        let skip = to_skip > 0;
        if skip {
            to_skip -= 1;
        }
        future::ready(Ok(skip))
    })
    .take(window.limit)
    .map_ok(LogRecord::from)
    .try_collect()
    .await
}
