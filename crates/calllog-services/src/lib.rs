//! Call log query services
//!
//! This crate holds the logic between callers and the call log data source:
//!
//! - `filter_compiler` - merges a caller filter with a category predicate
//!   into a selection, bound arguments, and a row window
//! - `projector` - turns a newest-first row stream into log records,
//!   honoring the window without over-scanning
//! - `call_log` - the nine entry points sharing one execution path
//!
//! # Architecture
//!
//! The service owns its data source behind the `CallLogProvider` trait, so
//! the same entry points run against SQLite or a test double. All
//! operations are instrumented with tracing.

pub mod call_log;
pub mod filter_compiler;
pub mod projector;

pub use call_log::{CallLogService, LogScope};
pub use filter_compiler::{build_number_query, build_query, CallLogQuery, QueryWindow};
pub use projector::project_rows;

/// Query constants
pub mod constants {
    /// Records returned when the caller gives no positive limit
    pub const DEFAULT_LIMIT: usize = 50;

    /// Records skipped when the caller gives no positive skip
    pub const DEFAULT_OFFSET: usize = 0;
}
