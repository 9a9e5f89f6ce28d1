use crate::domain::{FilterSpec, LogEntry, LogLevel, StatsSummary};
use crate::error::LogError;
use crate::port::LogRepository;
use crate::query;
use crate::validation::{self, FilterError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point for ingestion and retrieval.
///
/// Validates before touching storage and runs every read through the query
/// engine, so callers always see filtered, newest-first results.
#[derive(Clone)]
pub struct LogService {
    repository: Arc<dyn LogRepository>,
}

impl LogService {
    #[must_use]
    pub fn new(repository: Arc<dyn LogRepository>) -> Self {
        Self { repository }
    }

    /// Validate `candidate` and append it to the store.
    ///
    /// # Errors
    /// `LogError::Validation` with every violation, or `LogError::Storage`.
    pub async fn create(&self, candidate: &Value) -> Result<LogEntry, LogError> {
        let entry = validation::validate_entry(candidate).map_err(|errors| {
            warn!(violations = errors.len(), "Rejected log entry");
            LogError::Validation(errors)
        })?;

        let stored = self
            .repository
            .append(entry)
            .await
            .map_err(|source| LogError::Storage {
                operation: "create log",
                source,
            })?;

        info!(
            level = %stored.level,
            resource_id = %stored.resource_id,
            "Stored log entry"
        );
        Ok(stored)
    }

    /// Run raw query-string filters against the collection.
    ///
    /// # Errors
    /// `LogError::InvalidFilter` for a bad level or timestamp, or `LogError::Storage`.
    pub async fn find_all(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<LogEntry>, LogError> {
        let spec = validation::validate_filters(params)?;
        self.find(&spec).await
    }

    /// # Errors
    /// `LogError::InvalidFilter` when `level` is unknown.
    pub async fn find_by_level(&self, level: &str) -> Result<Vec<LogEntry>, LogError> {
        // Reject before reading the store.
        level
            .parse::<LogLevel>()
            .map_err(|_| FilterError::InvalidLevel(level.to_string()))?;
        let logs = self.load("fetch logs").await?;
        Ok(query::by_level(logs, level)?)
    }

    /// # Errors
    /// `LogError::Storage` when the collection cannot be read.
    pub async fn find_by_resource(&self, resource_id: &str) -> Result<Vec<LogEntry>, LogError> {
        let logs = self.load("fetch logs").await?;
        Ok(query::by_resource(logs, resource_id))
    }

    /// Case-insensitive message search.
    ///
    /// # Errors
    /// `LogError::MissingQuery` for an empty query, or `LogError::Storage`.
    pub async fn search(&self, q: &str) -> Result<Vec<LogEntry>, LogError> {
        if q.is_empty() {
            return Err(LogError::MissingQuery);
        }
        let logs = self.load("search logs").await?;
        Ok(query::search_by_message(logs, q))
    }

    /// # Errors
    /// `LogError::InvalidFilter` for an unparsable bound, or `LogError::Storage`.
    pub async fn find_by_time_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<LogEntry>, LogError> {
        let mut params = HashMap::new();
        if let Some(start) = start {
            params.insert("timestamp_start".to_string(), start.to_string());
        }
        if let Some(end) = end {
            params.insert("timestamp_end".to_string(), end.to_string());
        }
        self.find_all(&params).await
    }

    #[must_use]
    pub fn levels(&self) -> [LogLevel; 4] {
        query::levels()
    }

    /// # Errors
    /// `LogError::Storage` when the collection cannot be read.
    pub async fn stats(&self) -> Result<StatsSummary, LogError> {
        let logs = self.load("compute log statistics").await?;
        Ok(query::stats(&logs))
    }

    async fn find(&self, spec: &FilterSpec) -> Result<Vec<LogEntry>, LogError> {
        let logs = self.load("fetch logs").await?;
        Ok(query::query(logs, spec))
    }

    async fn load(&self, operation: &'static str) -> Result<Vec<LogEntry>, LogError> {
        self.repository
            .read_all()
            .await
            .map_err(|source| LogError::Storage { operation, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryRepository;
    use crate::validation::ViolationKind;
    use serde_json::json;

    fn candidate(level: &str, message: &str, resource: &str, timestamp: &str) -> Value {
        json!({
            "level": level,
            "message": message,
            "resourceId": resource,
            "timestamp": timestamp,
            "traceId": "trace-123",
            "spanId": "span-456",
            "commit": "abc123",
            "metadata": { "userId": "user1" }
        })
    }

    fn service() -> (Arc<MemoryRepository>, LogService) {
        let repo = Arc::new(MemoryRepository::new());
        let service = LogService::new(repo.clone());
        (repo, service)
    }

    async fn seeded() -> (Arc<MemoryRepository>, LogService) {
        let (repo, service) = service();
        for (level, message, resource, ts) in [
            ("info", "User logged in", "auth", "2024-01-01T10:00:00Z"),
            ("error", "Payment failed", "billing", "2024-01-02T10:00:00Z"),
            ("debug", "Cache warmup", "auth", "2024-01-03T10:00:00Z"),
        ] {
            service
                .create(&candidate(level, message, resource, ts))
                .await
                .unwrap();
        }
        (repo, service)
    }

    #[tokio::test]
    async fn test_create_stores_valid_entry() {
        let (repo, service) = service();
        let input = candidate(
            "info",
            "Test log message from test",
            "test-server",
            "2024-01-01T12:00:00Z",
        );

        let stored = service.create(&input).await.unwrap();

        assert_eq!(serde_json::to_value(&stored).unwrap(), input);
        assert_eq!(repo.stored(), vec![stored]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_entry_without_storing() {
        let (repo, service) = service();

        let err = service
            .create(&json!({ "level": "invalid-level", "message": "" }))
            .await
            .unwrap_err();

        let LogError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors
            .iter()
            .any(|e| e.field == "level" && e.kind == ViolationKind::InvalidEnum));
        assert!(errors
            .iter()
            .any(|e| e.field == "message" && e.kind == ViolationKind::TooShort));
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_applies_filters() {
        let (_repo, service) = seeded().await;

        let params = HashMap::from([("resourceId".to_string(), "auth".to_string())]);
        let logs = service.find_all(&params).await.unwrap();

        let messages: Vec<&str> = logs.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["Cache warmup", "User logged in"]);
    }

    #[tokio::test]
    async fn test_find_all_rejects_bad_filter() {
        let (_repo, service) = seeded().await;

        let params = HashMap::from([("timestamp_start".to_string(), "soon".to_string())]);
        let err = service.find_all(&params).await.unwrap_err();
        assert!(matches!(err, LogError::InvalidFilter(FilterError::InvalidStart(_))));
    }

    #[tokio::test]
    async fn test_find_by_level_rejects_unknown_level_before_reading() {
        let (repo, service) = seeded().await;
        repo.set_should_fail(true);

        let err = service.find_by_level("trace").await.unwrap_err();
        assert!(matches!(err, LogError::InvalidFilter(FilterError::InvalidLevel(_))));
    }

    #[tokio::test]
    async fn test_find_by_level_with_no_matches_is_empty() {
        let (_repo, service) = seeded().await;
        assert!(service.find_by_level("warn").await.unwrap().is_empty());
        assert_eq!(service.find_by_level("error").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let (_repo, service) = seeded().await;
        assert!(matches!(
            service.search("").await.unwrap_err(),
            LogError::MissingQuery
        ));
        assert_eq!(service.search("PAYMENT").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_whitespace_is_a_literal_term() {
        let (_repo, service) = seeded().await;
        let logs = service.search(" ").await.unwrap();
        assert_eq!(logs.len(), 3);
        assert!(service.search("  ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_time_range() {
        let (_repo, service) = seeded().await;
        let logs = service
            .find_by_time_range(Some("2024-01-02T00:00:00Z"), None)
            .await
            .unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "Cache warmup");
    }

    #[tokio::test]
    async fn test_stats_and_levels() {
        let (_repo, service) = seeded().await;
        let summary = service.stats().await.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_level.sum(), 3);
        assert_eq!(summary.by_resource["auth"], 2);
        assert_eq!(service.levels(), LogLevel::ALL);
    }

    #[tokio::test]
    async fn test_storage_failure_is_wrapped_with_operation() {
        let (repo, service) = seeded().await;
        repo.set_should_fail(true);

        let err = service.stats().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to compute log statistics"));

        let err = service
            .create(&candidate("info", "x", "r", "2024-01-01T00:00:00Z"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LogError::Storage {
                operation: "create log",
                ..
            }
        ));
    }
}
