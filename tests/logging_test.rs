use logsink::adapter::json_file::JsonFileStore;
use logsink::service::LogService;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_stored_entry_is_logged() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("logs.json")).await.unwrap();
    let service = LogService::new(Arc::new(store));

    service
        .create(&json!({
            "level": "warn",
            "message": "disk 90% full",
            "resourceId": "node-7",
            "timestamp": "2024-05-01T00:00:00Z",
            "traceId": "t",
            "spanId": "s",
            "commit": "c",
            "metadata": {}
        }))
        .await
        .unwrap();

    assert!(logs_contain("Stored log entry"));
    assert!(logs_contain("node-7"));
}

#[tokio::test]
#[traced_test]
async fn test_rejected_entry_is_logged() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("logs.json")).await.unwrap();
    let service = LogService::new(Arc::new(store));

    assert!(service.create(&json!({ "level": "info" })).await.is_err());
    assert!(logs_contain("Rejected log entry"));
}
