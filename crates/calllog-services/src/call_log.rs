//! Call log service
//!
//! The nine entry points. Each one picks a base predicate and runs the
//! shared compile, query, project path against the configured provider.

use calllog_core::{
    models::{columns, CallCategory, LogFilter, LogRecord, NumberFilter},
    traits::CallLogProvider,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::filter_compiler::{build_number_query, build_query, category_predicate, CallLogQuery};
use crate::projector::project_rows;

/// Row set an entry point queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogScope {
    All,
    Outgoing,
    Incoming,
    Missed,
    Rejected,
    Blocked,
    ExternallyAnswered,
    /// Outgoing calls with zero duration
    NotConnected,
}

impl LogScope {
    /// Every scope, in entry point order
    pub const ALL: [LogScope; 8] = [
        LogScope::All,
        LogScope::Outgoing,
        LogScope::Incoming,
        LogScope::Missed,
        LogScope::Rejected,
        LogScope::Blocked,
        LogScope::ExternallyAnswered,
        LogScope::NotConnected,
    ];

    /// Category filtered on by a plain category scope
    pub fn category(self) -> Option<CallCategory> {
        match self {
            LogScope::Outgoing => Some(CallCategory::Outgoing),
            LogScope::Incoming => Some(CallCategory::Incoming),
            LogScope::Missed => Some(CallCategory::Missed),
            LogScope::Rejected => Some(CallCategory::Rejected),
            LogScope::Blocked => Some(CallCategory::Blocked),
            LogScope::ExternallyAnswered => Some(CallCategory::External),
            LogScope::All | LogScope::NotConnected => None,
        }
    }

    /// Base predicate handed to the filter compiler
    pub fn base_predicate(self) -> Option<String> {
        match self {
            LogScope::NotConnected => category_predicate(CallCategory::Outgoing)
                .map(|outgoing| format!("{} = 0 AND {}", columns::DURATION, outgoing)),
            scope => scope.category().and_then(category_predicate),
        }
    }
}

/// Call log service
///
/// Stateless apart from its provider; every call is one independent
/// query with no retries.
#[derive(Clone)]
pub struct CallLogService {
    provider: Arc<dyn CallLogProvider>,
}

impl CallLogService {
    /// Create a new call log service
    pub fn new(provider: Arc<dyn CallLogProvider>) -> Self {
        Self { provider }
    }

    /// Every call, newest first
    pub async fn get_all_logs(&self, filter: Option<&LogFilter>) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::All, filter).await
    }

    /// Outgoing calls
    pub async fn get_outgoing_logs(&self, filter: Option<&LogFilter>) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::Outgoing, filter).await
    }

    /// Incoming calls
    pub async fn get_incoming_logs(&self, filter: Option<&LogFilter>) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::Incoming, filter).await
    }

    /// Missed calls
    pub async fn get_missed_logs(&self, filter: Option<&LogFilter>) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::Missed, filter).await
    }

    /// Rejected calls
    pub async fn get_rejected_logs(&self, filter: Option<&LogFilter>) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::Rejected, filter).await
    }

    /// Blocked calls
    pub async fn get_blocked_logs(&self, filter: Option<&LogFilter>) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::Blocked, filter).await
    }

    /// Calls answered on another device
    pub async fn get_externally_answered_logs(
        &self,
        filter: Option<&LogFilter>,
    ) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::ExternallyAnswered, filter).await
    }

    /// Outgoing calls that never connected
    pub async fn get_not_connected_logs(
        &self,
        filter: Option<&LogFilter>,
    ) -> AppResult<Vec<LogRecord>> {
        self.get_logs(LogScope::NotConnected, filter).await
    }

    /// Calls whose number contains `phoneNumber`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` without querying when `phoneNumber` is missing.
    #[instrument(skip(self))]
    pub async fn get_by_number(&self, filter: Option<&NumberFilter>) -> AppResult<Vec<LogRecord>> {
        let query = build_number_query(filter).map_err(|e| {
            warn!("Rejected number lookup: {}", e);
            e
        })?;

        self.execute(query).await
    }

    /// Query one scope
    #[instrument(skip(self))]
    pub async fn get_logs(
        &self,
        scope: LogScope,
        filter: Option<&LogFilter>,
    ) -> AppResult<Vec<LogRecord>> {
        let query = build_query(filter, scope.base_predicate(), Vec::new());
        self.execute(query).await
    }

    async fn execute(&self, query: CallLogQuery) -> AppResult<Vec<LogRecord>> {
        debug!(
            "Compiled call log query: selection={:?}, args={}, limit={}, offset={}",
            query.selection.clause,
            query.selection.args.len(),
            query.window.limit,
            query.window.offset
        );

        let rows = self
            .provider
            .query(&query.selection)
            .await
            .map_err(fetch_error)?;

        let records = project_rows(rows, query.window)
            .await
            .map_err(fetch_error)?;

        info!("Retrieved {} call log records", records.len());

        Ok(records)
    }
}

fn fetch_error(err: AppError) -> AppError {
    warn!("Call log fetch failed: {}", err);
    err.into_fetch()
}
