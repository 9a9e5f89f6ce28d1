use crate::domain::LogEntry;
use crate::error::StorageError;
use std::future::Future;
use std::pin::Pin;

/// Persistence for the log collection.
///
/// This trait is dyn-compatible by using boxed futures instead of `impl Future`.
pub trait LogRepository: Send + Sync {
    /// Append one entry to the end of the collection and return it as stored.
    fn append(
        &self,
        entry: LogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<LogEntry, StorageError>> + Send + '_>>;

    /// Read the full collection in insertion order.
    fn read_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LogEntry>, StorageError>> + Send + '_>>;
}
