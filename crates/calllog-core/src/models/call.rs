//! Call log record model
//!
//! Represents one call history entry as exposed to callers, plus the raw
//! row shape read from the platform call log.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Column names of the platform call log table
pub mod columns {
    /// Row identifier
    pub const ID: &str = "_id";
    /// Caller/callee number
    pub const NUMBER: &str = "number";
    /// Raw call type code
    pub const TYPE: &str = "type";
    /// Call duration in seconds
    pub const DURATION: &str = "duration";
    /// Call date, epoch milliseconds
    pub const DATE: &str = "date";
    /// ISO country code of the number
    pub const COUNTRY_ISO: &str = "countryiso";

    /// Fixed result ordering, newest first
    pub const SORT_ORDER: &str = "date DESC";
}

/// Call category
///
/// Closed set of labels a raw call type code maps to. `Unknown` absorbs
/// every code outside the table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallCategory {
    Incoming,
    Outgoing,
    Missed,
    Voicemail,
    Rejected,
    Blocked,
    External,
    Unknown,
}

/// Raw type code for each recognized category
const CATEGORY_CODES: [(CallCategory, i64); 7] = [
    (CallCategory::Incoming, 1),
    (CallCategory::Outgoing, 2),
    (CallCategory::Missed, 3),
    (CallCategory::Voicemail, 4),
    (CallCategory::Rejected, 5),
    (CallCategory::Blocked, 6),
    (CallCategory::External, 7),
];

impl CallCategory {
    /// Raw type code stored by the platform, `None` for `Unknown`
    pub fn code(self) -> Option<i64> {
        CATEGORY_CODES
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, code)| *code)
    }

    /// Map a raw type code to its category
    pub fn from_code(code: i64) -> Self {
        CATEGORY_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map_or(CallCategory::Unknown, |(category, _)| *category)
    }

    /// Parse an upper-case label such as `"INCOMING"`
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "INCOMING" => Some(Self::Incoming),
            "OUTGOING" => Some(Self::Outgoing),
            "MISSED" => Some(Self::Missed),
            "VOICEMAIL" => Some(Self::Voicemail),
            "REJECTED" => Some(Self::Rejected),
            "BLOCKED" => Some(Self::Blocked),
            "EXTERNAL" => Some(Self::External),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Label as exposed to callers
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "INCOMING",
            Self::Outgoing => "OUTGOING",
            Self::Missed => "MISSED",
            Self::Voicemail => "VOICEMAIL",
            Self::Rejected => "REJECTED",
            Self::Blocked => "BLOCKED",
            Self::External => "EXTERNAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for CallCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw call log row
///
/// Columns as read from the data source; every column may be NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCallRow {
    pub id: i64,
    pub number: Option<String>,
    pub call_type: Option<i64>,
    pub duration: Option<String>,
    pub date: Option<String>,
    pub country_iso: Option<String>,
}

/// Call log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogRecord {
    /// Caller/callee number, empty if absent
    pub number: String,

    /// Epoch milliseconds as decimal text
    pub date: String,

    /// Duration in seconds as decimal text
    pub duration: String,

    /// ISO country code, empty if absent
    pub country: String,

    /// Call category
    #[serde(rename = "type")]
    pub call_type: CallCategory,
}

impl LogRecord {
    /// Call date as a UTC timestamp
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let millis = self.date.parse::<i64>().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> Option<i64> {
        self.duration.parse().ok()
    }

    /// Outgoing call that never connected
    pub fn is_not_connected(&self) -> bool {
        self.call_type == CallCategory::Outgoing && self.duration_secs() == Some(0)
    }
}

impl From<RawCallRow> for LogRecord {
    fn from(row: RawCallRow) -> Self {
        Self {
            number: row.number.unwrap_or_default(),
            date: row.date.unwrap_or_default(),
            duration: row.duration.unwrap_or_default(),
            country: row.country_iso.unwrap_or_default(),
            // NULL reads as code 0
            call_type: CallCategory::from_code(row.call_type.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes() {
        assert_eq!(CallCategory::from_code(1), CallCategory::Incoming);
        assert_eq!(CallCategory::from_code(2), CallCategory::Outgoing);
        assert_eq!(CallCategory::from_code(4), CallCategory::Voicemail);
        assert_eq!(CallCategory::from_code(7), CallCategory::External);
        assert_eq!(CallCategory::Rejected.code(), Some(5));
        assert_eq!(CallCategory::Unknown.code(), None);
    }

    #[test]
    fn test_unrecognized_code_is_unknown() {
        for code in [0, -1, 8, 42, i64::MAX] {
            assert_eq!(CallCategory::from_code(code), CallCategory::Unknown);
        }
    }

    #[test]
    fn test_label_roundtrip() {
        for (category, _) in CATEGORY_CODES {
            assert_eq!(CallCategory::from_label(category.as_str()), Some(category));
        }
        assert_eq!(CallCategory::from_label("incoming"), None);
    }

    #[test]
    fn test_record_from_row_with_nulls() {
        let record = LogRecord::from(RawCallRow {
            id: 1,
            date: Some("1640995200000".to_string()),
            ..Default::default()
        });

        assert_eq!(record.number, "");
        assert_eq!(record.duration, "");
        assert_eq!(record.country, "");
        assert_eq!(record.date, "1640995200000");
        assert_eq!(record.call_type, CallCategory::Unknown);
    }

    #[test]
    fn test_record_serialization() {
        let record = LogRecord {
            number: "+1234567890".to_string(),
            date: "1640995200000".to_string(),
            duration: "120".to_string(),
            country: "US".to_string(),
            call_type: CallCategory::Incoming,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "INCOMING");
        assert_eq!(json["duration"], "120");
    }

    #[test]
    fn test_record_helpers() {
        let record = LogRecord {
            number: "555".to_string(),
            date: "1640995200000".to_string(),
            duration: "0".to_string(),
            country: String::new(),
            call_type: CallCategory::Outgoing,
        };

        assert!(record.is_not_connected());
        assert_eq!(
            record.timestamp().map(|t| t.to_rfc3339()),
            Some("2022-01-01T00:00:00+00:00".to_string())
        );

        let answered = LogRecord {
            duration: "35".to_string(),
            ..record
        };
        assert!(!answered.is_not_connected());
        assert_eq!(answered.duration_secs(), Some(35));
    }
}
