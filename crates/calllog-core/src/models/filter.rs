//! Query filters supplied by callers

use super::call::CallCategory;
use serde::{Deserialize, Deserializer, Serialize};

/// Filter shared by every entry point
///
/// All fields are optional. Zero or negative values fall back to the
/// defaults when the query is compiled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    /// Inclusive lower bound on call date (epoch millis)
    pub from_epoch: Option<i64>,

    /// Inclusive upper bound on call date (epoch millis)
    pub to_epoch: Option<i64>,

    /// Maximum records returned
    pub limit: Option<i64>,

    /// Matching records skipped before collecting
    pub skip: Option<i64>,
}

/// Filter for number lookups
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NumberFilter {
    #[serde(flatten)]
    pub common: LogFilter,

    /// Substring matched against the number; required. A key present
    /// with a null value reads as the empty pattern.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_number: Option<String>,

    /// Optional narrowing to one category; unrecognized labels narrow nothing
    #[serde(rename = "type", default, deserialize_with = "lenient_category")]
    pub call_type: Option<CallCategory>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<CallCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(CallCategory::from_label))
}

impl NumberFilter {
    /// Number filter with no other constraints
    pub fn for_number(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_deserialize_camel_case() {
        let filter: LogFilter = serde_json::from_str(
            r#"{"fromEpoch": 1640995200000, "toEpoch": 1641081600000, "limit": 10, "skip": 0}"#,
        )
        .unwrap();

        assert_eq!(filter.from_epoch, Some(1_640_995_200_000));
        assert_eq!(filter.to_epoch, Some(1_641_081_600_000));
        assert_eq!(filter.limit, Some(10));
        assert_eq!(filter.skip, Some(0));
    }

    #[test]
    fn test_number_filter_deserialize() {
        let filter: NumberFilter =
            serde_json::from_str(r#"{"phoneNumber": "+1234567890", "type": "INCOMING", "limit": 5}"#)
                .unwrap();

        assert_eq!(filter.phone_number.as_deref(), Some("+1234567890"));
        assert_eq!(filter.call_type, Some(CallCategory::Incoming));
        assert_eq!(filter.common.limit, Some(5));
    }

    #[test]
    fn test_number_filter_missing_phone() {
        let filter: NumberFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.phone_number.is_none());
    }

    #[test]
    fn test_number_filter_null_phone_is_empty() {
        let filter: NumberFilter = serde_json::from_str(r#"{"phoneNumber": null}"#).unwrap();
        assert_eq!(filter.phone_number.as_deref(), Some(""));
    }

    #[test]
    fn test_number_filter_unknown_type_is_ignored() {
        let filter: NumberFilter =
            serde_json::from_str(r#"{"phoneNumber": "555", "type": "SPAM"}"#).unwrap();
        assert_eq!(filter.phone_number.as_deref(), Some("555"));
        assert_eq!(filter.call_type, None);

        let filter: NumberFilter =
            serde_json::from_str(r#"{"phoneNumber": "555", "type": null}"#).unwrap();
        assert_eq!(filter.call_type, None);
    }
}
