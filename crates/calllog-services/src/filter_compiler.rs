//! Filter compiler
//!
//! Turns an optional caller filter plus an optional base predicate into the
//! selection handed to the data source and the window applied to its rows.

use calllog_core::{
    models::{columns, CallCategory, LogFilter, NumberFilter},
    traits::Selection,
    AppError, AppResult,
};

use crate::constants::{DEFAULT_LIMIT, DEFAULT_OFFSET};

/// Row window applied client-side to the newest-first rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    /// Maximum records collected, always positive
    pub limit: usize,

    /// Matching rows skipped before collecting
    pub offset: usize,
}

impl Default for QueryWindow {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Compiled query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLogQuery {
    pub selection: Selection,
    pub window: QueryWindow,
}

/// `type = <code>` predicate for a category, `None` for `Unknown`
pub fn category_predicate(category: CallCategory) -> Option<String> {
    category
        .code()
        .map(|code| format!("{} = {}", columns::TYPE, code))
}

/// Strictly positive caller value, or the default
fn positive_or(value: Option<i64>, default: usize) -> usize {
    value
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Compile a filter against a base predicate
///
/// Date bounds are integers and go into the clause directly; `args` carries
/// the values for any placeholders already present in `base`.
pub fn build_query(filter: Option<&LogFilter>, base: Option<String>, args: Vec<String>) -> CallLogQuery {
    let mut clause = base.filter(|b| !b.is_empty());
    let mut window = QueryWindow::default();

    if let Some(filter) = filter {
        let mut date_conditions = Vec::new();

        if let Some(from) = filter.from_epoch.filter(|v| *v > 0) {
            date_conditions.push(format!("{} >= {}", columns::DATE, from));
        }
        if let Some(to) = filter.to_epoch.filter(|v| *v > 0) {
            date_conditions.push(format!("{} <= {}", columns::DATE, to));
        }

        if !date_conditions.is_empty() {
            let date_clause = date_conditions.join(" AND ");
            clause = Some(match clause {
                Some(base) => format!("{} AND {}", base, date_clause),
                None => date_clause,
            });
        }

        window.limit = positive_or(filter.limit, DEFAULT_LIMIT);
        // skip = 0 and no skip are the same thing
        window.offset = positive_or(filter.skip, DEFAULT_OFFSET);
    }

    CallLogQuery {
        selection: Selection { clause, args },
        window,
    }
}

/// Compile a number lookup
///
/// The phone number is bound as a `LIKE` substring pattern. A `type`
/// narrowing reuses the category predicate table; `Unknown` narrows nothing.
///
/// # Errors
///
/// Returns `InvalidParameters` when no phone number is given.
pub fn build_number_query(filter: Option<&NumberFilter>) -> AppResult<CallLogQuery> {
    let (filter, phone_number) = filter
        .and_then(|f| f.phone_number.as_deref().map(|number| (f, number)))
        .ok_or_else(|| AppError::InvalidParameters("phoneNumber is required".to_string()))?;

    let mut base = format!("{} LIKE ?", columns::NUMBER);
    if let Some(predicate) = filter.call_type.and_then(category_predicate) {
        base.push_str(" AND ");
        base.push_str(&predicate);
    }

    Ok(build_query(
        Some(&filter.common),
        Some(base),
        vec![format!("%{}%", phone_number)],
    ))
}
