//! Field-level checks for incoming log entries and query filters.
//!
//! Entry validation collects every violation so the caller can report the
//! full list in one response. Filter validation is looser: unknown keys are
//! ignored and the first bad value is reported.

use crate::domain::{FilterSpec, LogEntry, LogLevel};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Fields of a log entry, in schema order.
pub const ENTRY_FIELDS: [&str; 8] = [
    "level",
    "message",
    "resourceId",
    "timestamp",
    "traceId",
    "spanId",
    "commit",
    "metadata",
];

const NON_EMPTY_STRING_FIELDS: [&str; 5] = ["message", "resourceId", "traceId", "spanId", "commit"];

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    InvalidEnum,
    TooShort,
    BadFormat,
    WrongType,
    UnexpectedField,
}

/// One schema violation.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        let field = field.into();
        let message = match kind {
            ViolationKind::MissingField => format!("must have required property '{field}'"),
            ViolationKind::InvalidEnum => format!(
                "must be equal to one of the allowed values: {}",
                LogLevel::allowed()
            ),
            ViolationKind::TooShort => "must NOT have fewer than 1 characters".to_string(),
            ViolationKind::BadFormat => "must match format \"date-time\"".to_string(),
            ViolationKind::WrongType => match field.as_str() {
                "metadata" | "" => "must be object".to_string(),
                _ => "must be string".to_string(),
            },
            ViolationKind::UnexpectedField => "must NOT have additional properties".to_string(),
        };
        Self {
            field,
            kind,
            message,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} {}", self.field, self.message)
        }
    }
}

/// A rejected query filter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid log level '{0}'. Level must be one of: {levels}", levels = LogLevel::allowed())]
    InvalidLevel(String),

    #[error("Invalid start timestamp format: {0}")]
    InvalidStart(String),

    #[error("Invalid end timestamp format: {0}")]
    InvalidEnd(String),
}

/// Validate a candidate entry and build a `LogEntry` from it.
///
/// # Errors
/// Returns every violation found when the candidate does not match the schema.
pub fn validate_entry(candidate: &Value) -> Result<LogEntry, Vec<FieldError>> {
    let Some(object) = candidate.as_object() else {
        return Err(vec![FieldError::new("", ViolationKind::WrongType)]);
    };

    let mut errors = Vec::new();

    for field in ENTRY_FIELDS {
        if !object.contains_key(field) {
            errors.push(FieldError::new(field, ViolationKind::MissingField));
        }
    }

    if let Some(level) = object.get("level") {
        let known = level
            .as_str()
            .is_some_and(|s| s.parse::<LogLevel>().is_ok());
        if !known {
            errors.push(FieldError::new("level", ViolationKind::InvalidEnum));
        }
    }

    for field in NON_EMPTY_STRING_FIELDS {
        match object.get(field) {
            None => {}
            Some(Value::String(s)) if !s.is_empty() => {}
            Some(Value::String(_)) => errors.push(FieldError::new(field, ViolationKind::TooShort)),
            Some(_) => errors.push(FieldError::new(field, ViolationKind::WrongType)),
        }
    }

    match object.get("timestamp") {
        None => {}
        Some(Value::String(s)) if is_date_time(s) => {}
        Some(Value::String(_)) => {
            errors.push(FieldError::new("timestamp", ViolationKind::BadFormat));
        }
        Some(_) => errors.push(FieldError::new("timestamp", ViolationKind::WrongType)),
    }

    match object.get("metadata") {
        None | Some(Value::Object(_)) => {}
        Some(_) => errors.push(FieldError::new("metadata", ViolationKind::WrongType)),
    }

    for key in object.keys() {
        if !ENTRY_FIELDS.contains(&key.as_str()) {
            errors.push(FieldError::new(key.as_str(), ViolationKind::UnexpectedField));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    build_entry(object).ok_or_else(|| vec![FieldError::new("", ViolationKind::WrongType)])
}

// Only reached after every check above passed.
fn build_entry(object: &Map<String, Value>) -> Option<LogEntry> {
    let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
    Some(LogEntry {
        level: object.get("level")?.as_str()?.parse().ok()?,
        message: text("message")?,
        resource_id: text("resourceId")?,
        timestamp: text("timestamp")?,
        trace_id: text("traceId")?,
        span_id: text("spanId")?,
        commit: text("commit")?,
        metadata: object.get("metadata")?.as_object()?.clone(),
    })
}

/// Validate raw query parameters into a `FilterSpec`.
///
/// Empty values count as absent. Keys other than the five filter names are
/// ignored.
///
/// # Errors
/// Returns the first invalid level or timestamp bound.
pub fn validate_filters(params: &HashMap<String, String>) -> Result<FilterSpec, FilterError> {
    let value = |key: &str| {
        params
            .get(key)
            .filter(|v| !v.is_empty())
            .map(String::to_string)
    };

    let level = match value("level") {
        Some(raw) => Some(
            raw.parse::<LogLevel>()
                .map_err(|_| FilterError::InvalidLevel(raw))?,
        ),
        None => None,
    };

    let timestamp_start = value("timestamp_start");
    if let Some(start) = &timestamp_start {
        if !is_valid_date(start) {
            return Err(FilterError::InvalidStart(start.clone()));
        }
    }

    let timestamp_end = value("timestamp_end");
    if let Some(end) = &timestamp_end {
        if !is_valid_date(end) {
            return Err(FilterError::InvalidEnd(end.clone()));
        }
    }

    Ok(FilterSpec {
        level,
        message: value("message"),
        resource_id: value("resourceId"),
        timestamp_start,
        timestamp_end,
    })
}

/// Parse a full date-time with a mandatory offset. Besides RFC 3339 this
/// accepts offsets written without a colon (`+0900`) or without minutes (`+09`).
#[must_use]
pub fn parse_date_time(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%#z"))
        .ok()
}

/// Date-time check for stored timestamps.
#[must_use]
pub fn is_date_time(s: &str) -> bool {
    parse_date_time(s).is_some()
}

/// Lenient date check for filter bounds: RFC 3339, a date-time without
/// offset, or a plain calendar date.
#[must_use]
pub fn is_valid_date(s: &str) -> bool {
    is_date_time(s)
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
