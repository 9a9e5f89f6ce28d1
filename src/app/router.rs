use crate::handler::health::{health_handler, not_found_handler, root_handler};
use crate::handler::logs::{
    create_log, list_logs, log_levels, log_stats, logs_by_level, logs_by_resource, search_logs,
};
use crate::service::LogService;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected.
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Build the `/api/logs` routes.
pub fn logs_router(service: LogService) -> Router {
    Router::new()
        .route("/api/logs", get(list_logs).post(create_log))
        .route("/api/logs/levels", get(log_levels))
        .route("/api/logs/stats", get(log_stats))
        .route("/api/logs/search", get(search_logs))
        .route("/api/logs/level/{level}", get(logs_by_level))
        .route("/api/logs/resource/{resource_id}", get(logs_by_resource))
        .with_state(service)
}

/// CORS for the configured origin. `*` allows any origin, and credentials
/// are only allowed for a concrete origin.
fn cors_layer(cors_origin: HeaderValue) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if cors_origin == "*" {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(cors_origin).allow_credentials(true)
    }
}

/// Build the full HTTP router (root + health + logs API).
pub fn main_router(service: LogService, cors_origin: HeaderValue) -> Router {
    let cors = cors_layer(cors_origin);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(logs_router(service))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
