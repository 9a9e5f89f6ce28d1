//! JSON envelope shared by every endpoint.
//!
//! Success: `{ "success": true, "message": ..., "data": ..., "count"?: n }`
//! Failure: `{ "success": false, "message": ..., "error": ... }`

use crate::error::LogError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

#[derive(Serialize, Debug)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    status: StatusCode,
    success: bool,
    message: String,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            message: message.into(),
            data,
            count: None,
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(message, data)
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// A list response carrying its length as `count`.
    pub fn list(message: impl Into<String>, data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            count: Some(count),
            ..Self::ok(message, data)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error: impl Into<Value>) -> Self {
        Self {
            status,
            message: message.into(),
            error: error.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, error: impl Into<Value>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, error)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            error: Value::Null,
        }
    }

    /// Map a service failure, using `context` as the message for server-side errors.
    pub fn from_log_error(err: LogError, context: &str) -> Self {
        match err {
            LogError::Validation(errors) => Self::bad_request(
                "Failed to create log entry",
                serde_json::to_value(&errors).unwrap_or(Value::Null),
            ),
            LogError::InvalidFilter(e) => Self::bad_request("Invalid filter", e.to_string()),
            LogError::MissingQuery => {
                Self::bad_request("Search query is required", "Please provide a search term")
            }
            storage @ LogError::Storage { .. } => {
                error!("{context}: {storage}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: context.to_string(),
                    error: Value::String(storage.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "message": self.message,
        });
        if !self.error.is_null() {
            body["error"] = self.error;
        }
        (self.status, Json(body)).into_response()
    }
}
