//! Call log query DTOs

use calllog_core::models::{CallCategory, LogFilter, NumberFilter};
use serde::Deserialize;
use validator::Validate;

/// Filter parameters shared by every call log endpoint
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogFilterParams {
    /// Inclusive lower bound on call date (epoch millis)
    pub from_epoch: Option<i64>,

    /// Inclusive upper bound on call date (epoch millis)
    pub to_epoch: Option<i64>,

    /// Maximum records returned (default 50)
    pub limit: Option<i64>,

    /// Records skipped before collecting
    pub skip: Option<i64>,
}

impl From<LogFilterParams> for LogFilter {
    fn from(params: LogFilterParams) -> Self {
        Self {
            from_epoch: params.from_epoch,
            to_epoch: params.to_epoch,
            limit: params.limit,
            skip: params.skip,
        }
    }
}

/// Parameters for the by-number endpoint
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NumberFilterParams {
    /// Inclusive lower bound on call date (epoch millis)
    pub from_epoch: Option<i64>,

    /// Inclusive upper bound on call date (epoch millis)
    pub to_epoch: Option<i64>,

    /// Maximum records returned (default 50)
    pub limit: Option<i64>,

    /// Records skipped before collecting
    pub skip: Option<i64>,

    /// Substring matched against the number; required
    #[validate(length(max = 64, message = "phoneNumber is too long"))]
    pub phone_number: Option<String>,

    /// Category label to narrow to; unrecognized labels are ignored
    #[serde(rename = "type")]
    pub call_type: Option<String>,
}

impl From<NumberFilterParams> for NumberFilter {
    fn from(params: NumberFilterParams) -> Self {
        Self {
            common: LogFilter {
                from_epoch: params.from_epoch,
                to_epoch: params.to_epoch,
                limit: params.limit,
                skip: params.skip,
            },
            phone_number: params.phone_number,
            call_type: params.call_type.as_deref().and_then(CallCategory::from_label),
        }
    }
}
