use crate::validation::{FieldError, FilterError};
use std::path::PathBuf;
use thiserror::Error;

/// Process-level failures surfaced from `app::run`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log store: {0}")]
    Store(#[from] StorageError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Failures of the backing file. Always carries the path and the original cause.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize log collection: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by `LogService` operations.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    InvalidFilter(#[from] FilterError),

    #[error("Search query is required")]
    MissingQuery,

    #[error("Failed to {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },
}

impl LogError {
    /// True when the caller sent something unacceptable.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, LogError::Storage { .. })
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
