use axum::Json;
use axum::http::Uri;
use serde_json::{Value, json};
use tracing::info;

use super::response::ApiError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handler for GET /health
pub async fn health_handler() -> Json<Value> {
    info!("Health check requested");
    Json(json!({
        "success": true,
        "message": "Log System API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": VERSION,
    }))
}

/// Handler for GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Welcome to Log System API",
        "version": VERSION,
        "endpoints": {
            "health": "/health",
            "logs": "/api/logs",
            "logLevels": "/api/logs/levels",
            "logStats": "/api/logs/stats",
            "searchLogs": "/api/logs/search",
            "logsByLevel": "/api/logs/level/:level",
            "logsByResource": "/api/logs/resource/:resourceId"
        }
    }))
}

/// Fallback for unknown routes.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {uri} not found"))
}
