//! Shared test support utilities
//!
//! Provides an in-memory `LogRepository` with switchable failure injection.

use crate::domain::LogEntry;
use crate::error::StorageError;
use crate::port::LogRepository;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub struct MemoryRepository {
    logs: Mutex<Vec<LogEntry>>,
    should_fail: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::with_logs(Vec::new())
    }

    pub fn with_logs(logs: Vec<LogEntry>) -> Self {
        Self {
            logs: Mutex::new(logs),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<LogEntry> {
        self.logs.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<StorageError> {
        self.should_fail
            .load(Ordering::SeqCst)
            .then(|| StorageError::Read {
                path: PathBuf::from("memory"),
                source: std::io::Error::other("Mock storage failure"),
            })
    }
}

impl LogRepository for MemoryRepository {
    fn append(
        &self,
        entry: LogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<LogEntry, StorageError>> + Send + '_>> {
        Box::pin(async move {
            if let Some(err) = self.failure() {
                return Err(err);
            }
            self.logs.lock().unwrap().push(entry.clone());
            Ok(entry)
        })
    }

    fn read_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LogEntry>, StorageError>> + Send + '_>> {
        Box::pin(async move {
            if let Some(err) = self.failure() {
                return Err(err);
            }
            Ok(self.stored())
        })
    }
}
