//! Call log API handlers
//!
//! One GET route per entry point. Every route answers `{"data": [...]}`
//! with records newest first.

use crate::dto::{ApiResponse, LogFilterParams, NumberFilterParams};
use actix_web::{
    web::{self, Data, Json, Query},
    Result,
};
use calllog_core::{
    error::AppError,
    models::{LogFilter, LogRecord, NumberFilter},
};
use calllog_services::CallLogService;
use tracing::{debug, instrument, warn};
use validator::Validate;

type LogsResponse = Result<Json<ApiResponse<Vec<LogRecord>>>>;

/// List every call
///
/// ```text
/// GET /api/v1/call-logs?fromEpoch=1640995200000&limit=20
/// ```
#[instrument(skip(service))]
pub async fn list_all_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_all_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List outgoing calls
#[instrument(skip(service))]
pub async fn list_outgoing_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_outgoing_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List incoming calls
#[instrument(skip(service))]
pub async fn list_incoming_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_incoming_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List missed calls
#[instrument(skip(service))]
pub async fn list_missed_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_missed_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List rejected calls
#[instrument(skip(service))]
pub async fn list_rejected_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_rejected_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List blocked calls
#[instrument(skip(service))]
pub async fn list_blocked_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_blocked_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List calls answered on another device
#[instrument(skip(service))]
pub async fn list_externally_answered_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_externally_answered_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List outgoing calls that never connected
#[instrument(skip(service))]
pub async fn list_not_connected_logs(
    query: Query<LogFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    let filter = LogFilter::from(query.into_inner());
    let records = service.get_not_connected_logs(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// List calls whose number contains `phoneNumber`
///
/// # Errors
///
/// Returns 400 `INVALID_PARAMETERS` when `phoneNumber` is missing or too long.
///
/// ```text
/// GET /api/v1/call-logs/by-number?phoneNumber=555&type=MISSED
/// ```
#[instrument(skip(service))]
pub async fn list_logs_by_number(
    query: Query<NumberFilterParams>,
    service: Data<CallLogService>,
) -> LogsResponse {
    query.validate().map_err(|e| {
        warn!("Invalid by-number parameters: {}", e);
        AppError::from(e)
    })?;

    let filter = NumberFilter::from(query.into_inner());
    debug!(
        "Number lookup: phone_number={:?}, type={:?}",
        filter.phone_number, filter.call_type
    );

    let records = service.get_by_number(Some(&filter)).await?;
    Ok(Json(ApiResponse::success(records)))
}

fn query_error(
    err: actix_web::error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    warn!("Malformed call log query: {}", err);
    AppError::InvalidParameters(err.to_string()).into()
}

/// Configure call log routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/call-logs")
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .route("", web::get().to(list_all_logs))
            .route("/outgoing", web::get().to(list_outgoing_logs))
            .route("/incoming", web::get().to(list_incoming_logs))
            .route("/missed", web::get().to(list_missed_logs))
            .route("/rejected", web::get().to(list_rejected_logs))
            .route("/blocked", web::get().to(list_blocked_logs))
            .route(
                "/externally-answered",
                web::get().to(list_externally_answered_logs),
            )
            .route("/not-connected", web::get().to(list_not_connected_logs))
            .route("/by-number", web::get().to(list_logs_by_number)),
    );
}
