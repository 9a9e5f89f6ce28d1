use super::response::{ApiError, ApiResponse};
use crate::domain::{LogEntry, LogLevel, StatsSummary};
use crate::service::LogService;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, Query, State};
use std::collections::HashMap;
use tracing::{info, warn};

type ListResult = Result<ApiResponse<Vec<LogEntry>>, ApiError>;

/// Handler for POST /api/logs
pub async fn create_log(
    State(service): State<LogService>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<LogEntry>, ApiError> {
    let body = body.map_err(|rejection| {
        warn!("Failed to read log entry body: {rejection}");
        ApiError::new(
            rejection.status(),
            "Failed to create log entry",
            rejection.body_text(),
        )
    })?;
    info!("Received log entry with body length: {}", body.len());

    let candidate: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Failed to parse log entry body: {e}");
        ApiError::bad_request("Failed to create log entry", format!("Invalid JSON body: {e}"))
    })?;

    let entry = service
        .create(&candidate)
        .await
        .map_err(|e| ApiError::from_log_error(e, "Failed to create log entry"))?;

    Ok(ApiResponse::created("Log entry created successfully", entry))
}

/// Handler for GET /api/logs
pub async fn list_logs(
    State(service): State<LogService>,
    Query(params): Query<HashMap<String, String>>,
) -> ListResult {
    let logs = service
        .find_all(&params)
        .await
        .map_err(|e| ApiError::from_log_error(e, "Failed to retrieve logs"))?;

    Ok(ApiResponse::list("Logs retrieved successfully", logs))
}

/// Handler for GET /api/logs/level/{level}
pub async fn logs_by_level(
    State(service): State<LogService>,
    Path(level): Path<String>,
) -> ListResult {
    let logs = service.find_by_level(&level).await.map_err(|e| {
        if e.is_client_error() {
            ApiError::bad_request(
                "Invalid log level",
                format!("Level must be one of: {}", LogLevel::allowed()),
            )
        } else {
            ApiError::from_log_error(e, "Failed to retrieve logs by level")
        }
    })?;

    Ok(ApiResponse::list(
        format!("Logs with level '{level}' retrieved successfully"),
        logs,
    ))
}

/// Handler for GET /api/logs/resource/{resourceId}
pub async fn logs_by_resource(
    State(service): State<LogService>,
    Path(resource_id): Path<String>,
) -> ListResult {
    let logs = service
        .find_by_resource(&resource_id)
        .await
        .map_err(|e| ApiError::from_log_error(e, "Failed to retrieve logs by resource"))?;

    Ok(ApiResponse::list(
        format!("Logs for resource '{resource_id}' retrieved successfully"),
        logs,
    ))
}

/// Handler for GET /api/logs/search?q=
pub async fn search_logs(
    State(service): State<LogService>,
    Query(params): Query<HashMap<String, String>>,
) -> ListResult {
    let q = params.get("q").map(String::as_str).unwrap_or_default();

    let logs = service
        .search(q)
        .await
        .map_err(|e| ApiError::from_log_error(e, "Failed to search logs"))?;

    Ok(ApiResponse::list(format!("Search results for '{q}'"), logs))
}

/// Handler for GET /api/logs/levels
pub async fn log_levels(State(service): State<LogService>) -> ApiResponse<[LogLevel; 4]> {
    ApiResponse::ok("Log levels retrieved successfully", service.levels())
}

/// Handler for GET /api/logs/stats
pub async fn log_stats(
    State(service): State<LogService>,
) -> Result<ApiResponse<StatsSummary>, ApiError> {
    let stats = service
        .stats()
        .await
        .map_err(|e| ApiError::from_log_error(e, "Failed to retrieve log statistics"))?;

    Ok(ApiResponse::ok("Log statistics retrieved successfully", stats))
}
