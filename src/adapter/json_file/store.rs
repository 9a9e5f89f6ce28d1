// Keep the whole log collection in a single pretty-printed JSON array.
// Every append reads the full array, pushes the entry and rewrites the file
// through a temporary sibling that is renamed over the original.
//
// Appends are serialized by `write_lock` for the lifetime of the store, so
// concurrent requests in one process never drop each other's entries.
// Separate processes writing the same file are not coordinated.

use crate::domain::LogEntry;
use crate::error::StorageError;
use crate::port::LogRepository;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const EMPTY_COLLECTION: &[u8] = b"[]";

pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating parent directories and an empty
    /// collection file when absent.
    ///
    /// # Errors
    /// Returns `StorageError` if the directory or file cannot be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        match fs::metadata(&path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&path, EMPTY_COLLECTION)
                    .await
                    .map_err(|source| StorageError::Write {
                        path: path.clone(),
                        source,
                    })?;
                info!("Created empty log store at {}", path.display());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: path.clone(),
                    source,
                });
            }
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<LogEntry>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn store(&self, logs: &[LogEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(logs).map_err(StorageError::Serialize)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &json)
            .await
            .map_err(|source| StorageError::Write {
                path: tmp.clone(),
                source,
            })?;
        if let Err(source) = fs::rename(&tmp, &self.path).await {
            if let Err(e) = fs::remove_file(&tmp).await {
                warn!("Failed to remove {}: {e}", tmp.display());
            }
            return Err(StorageError::Write {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

impl LogRepository for JsonFileStore {
    fn append(
        &self,
        entry: LogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<LogEntry, StorageError>> + Send + '_>> {
        Box::pin(async move {
            let _guard = self.write_lock.lock().await;
            let mut logs = self.load().await?;
            logs.push(entry.clone());
            self.store(&logs).await?;
            debug!(total = logs.len(), "Appended log entry");
            Ok(entry)
        })
    }

    fn read_all(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LogEntry>, StorageError>> + Send + '_>> {
        Box::pin(self.load())
    }
}
