//! Call log repository implementation
//!
//! Reads a platform-shaped `calls` table with a fixed projection and a fixed
//! newest-first ordering. Rows are streamed, so a consumer that stops early
//! never scans the rest of the table, and dropping the stream hands the
//! connection back to the pool.

use async_stream::stream;
use async_trait::async_trait;
use calllog_core::{
    models::{columns, RawCallRow},
    traits::{CallLogProvider, RowStream, Selection},
    AppError, AppResult,
};
use futures::TryStreamExt;
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

/// Name of the call log table
pub const CALLS_TABLE: &str = "calls";

/// SQLite implementation of CallLogProvider
#[derive(Clone)]
pub struct SqliteCallLogProvider {
    pool: SqlitePool,
}

impl SqliteCallLogProvider {
    /// Create a new call log provider
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether the call log table exists at all
    async fn table_exists(&self) -> AppResult<bool> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(CALLS_TABLE)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error inspecting schema: {}", e);
                    AppError::Fetch(e.to_string())
                })?;

        Ok(result.0 > 0)
    }
}

/// Build the full SELECT for a selection
fn select_sql(selection: &Selection) -> String {
    let projection = format!(
        "{id} AS id, {number} AS number, {ty} AS call_type, \
         CAST({duration} AS TEXT) AS duration, CAST({date} AS TEXT) AS date, \
         {country} AS country_iso",
        id = columns::ID,
        number = columns::NUMBER,
        ty = columns::TYPE,
        duration = columns::DURATION,
        date = columns::DATE,
        country = columns::COUNTRY_ISO,
    );

    let where_clause = match selection.clause.as_deref() {
        Some(clause) if !clause.is_empty() => format!(" WHERE {}", clause),
        _ => String::new(),
    };

    format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        projection,
        CALLS_TABLE,
        where_clause,
        columns::SORT_ORDER
    )
}

#[async_trait]
impl CallLogProvider for SqliteCallLogProvider {
    #[instrument(skip(self))]
    async fn query(&self, selection: &Selection) -> AppResult<Option<RowStream>> {
        if !self.table_exists().await? {
            debug!("Table {} not found, no cursor", CALLS_TABLE);
            return Ok(None);
        }

        let sql = select_sql(selection);
        let args = selection.args.clone();
        let pool = self.pool.clone();
        debug!("Opening call log cursor: {}", sql);

        let rows: RowStream = Box::pin(stream! {
            let mut query = sqlx::query_as::<sqlx::Sqlite, CallRow>(&sql);
            for arg in &args {
                query = query.bind(arg.as_str());
            }

            let mut cursor = query.fetch(&pool);
            loop {
                match cursor.try_next().await {
                    Ok(Some(row)) => {
                        yield Ok(RawCallRow::from(row));
                    }
                    Ok(None) => break,
                    Err(e) => {
                        error!("Database error scanning call log: {}", e);
                        yield Err(AppError::Fetch(e.to_string()));
                        break;
                    }
                }
            }
        });

        Ok(Some(rows))
    }
}

/// Helper struct for mapping database rows to the raw row model
#[derive(Debug, sqlx::FromRow)]
struct CallRow {
    id: i64,
    number: Option<String>,
    call_type: Option<i64>,
    duration: Option<String>,
    date: Option<String>,
    country_iso: Option<String>,
}

impl From<CallRow> for RawCallRow {
    fn from(row: CallRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            call_type: row.call_type,
            duration: row.duration,
            date: row.date,
            country_iso: row.country_iso,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn seeded_provider() -> SqliteCallLogProvider {
        let pool = memory_pool().await;

        sqlx::query(
            r#"
            CREATE TABLE calls (
                _id INTEGER PRIMARY KEY AUTOINCREMENT,
                number TEXT,
                date INTEGER,
                duration INTEGER,
                type INTEGER,
                countryiso TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let rows: [(Option<&str>, i64, i64, i64, Option<&str>); 4] = [
            (Some("+15551230001"), 1_000, 60, 1, Some("US")),
            (Some("+15551230002"), 3_000, 0, 2, Some("US")),
            (None, 2_000, 12, 3, None),
            (Some("+442071234567"), 4_000, 5, 99, Some("GB")),
        ];

        for (number, date, duration, ty, country) in rows {
            sqlx::query(
                "INSERT INTO calls (number, date, duration, type, countryiso) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(number)
            .bind(date)
            .bind(duration)
            .bind(ty)
            .bind(country)
            .execute(&pool)
            .await
            .unwrap();
        }

        SqliteCallLogProvider::new(pool)
    }

    async fn collect(provider: &SqliteCallLogProvider, selection: Selection) -> Vec<RawCallRow> {
        provider
            .query(&selection)
            .await
            .unwrap()
            .expect("cursor")
            .try_collect()
            .await
            .unwrap()
    }

    #[test]
    fn test_select_sql_without_selection() {
        let sql = select_sql(&Selection::all());
        assert!(sql.starts_with("SELECT _id AS id, number AS number"));
        assert!(sql.ends_with("FROM calls ORDER BY date DESC"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_select_sql_with_selection() {
        let sql = select_sql(&Selection {
            clause: Some("type = 1".to_string()),
            args: vec![],
        });
        assert!(sql.ends_with("FROM calls WHERE type = 1 ORDER BY date DESC"));
    }

    #[tokio::test]
    async fn test_rows_are_newest_first() {
        let provider = seeded_provider().await;
        let rows = collect(&provider, Selection::all()).await;

        let dates: Vec<_> = rows.iter().map(|r| r.date.clone().unwrap()).collect();
        assert_eq!(dates, vec!["4000", "3000", "2000", "1000"]);
    }

    #[tokio::test]
    async fn test_columns_read_as_text_with_nulls() {
        let provider = seeded_provider().await;
        let rows = collect(&provider, Selection::all()).await;

        let missed = &rows[2];
        assert_eq!(missed.number, None);
        assert_eq!(missed.country_iso, None);
        assert_eq!(missed.duration.as_deref(), Some("12"));
        assert_eq!(missed.call_type, Some(3));
    }

    #[tokio::test]
    async fn test_bound_arguments() {
        let provider = seeded_provider().await;
        let rows = collect(
            &provider,
            Selection {
                clause: Some("number LIKE ?".to_string()),
                args: vec!["%555123%".to_string()],
            },
        )
        .await;

        assert_eq!(rows.len(), 2);
        assert!(rows
            .iter()
            .all(|r| r.number.as_deref().unwrap().contains("555123")));
    }

    #[tokio::test]
    async fn test_missing_table_yields_no_cursor() {
        let provider = SqliteCallLogProvider::new(memory_pool().await);
        let cursor = provider.query(&Selection::all()).await.unwrap();
        assert!(cursor.is_none());
    }

    #[tokio::test]
    async fn test_bad_selection_is_fetch_error() {
        let provider = seeded_provider().await;
        let result: AppResult<Vec<RawCallRow>> = provider
            .query(&Selection {
                clause: Some("no_such_column = 1".to_string()),
                args: vec![],
            })
            .await
            .unwrap()
            .expect("cursor")
            .try_collect()
            .await;

        assert!(matches!(result, Err(AppError::Fetch(_))));
    }
}
