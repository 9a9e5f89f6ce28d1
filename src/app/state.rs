use crate::adapter::json_file::JsonFileStore;
use crate::config::Settings;
use crate::error::AppError;
use crate::port::LogRepository;
use crate::service::LogService;
use axum::http::HeaderValue;
use std::sync::Arc;
use tracing::info;

/// Shared application state wired from configuration.
pub struct AppState {
    pub service: LogService,
    pub cors_origin: HeaderValue,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// Opens the JSON file store at `settings.db_path`, creating it when absent.
    pub async fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let cors_origin = HeaderValue::from_str(&settings.cors_origin).map_err(|e| {
            AppError::Config(format!("Invalid CORS origin {}: {e}", settings.cors_origin))
        })?;

        let store = JsonFileStore::open(&settings.db_path).await?;
        info!("Using log store at {}", store.path().display());

        let repository: Arc<dyn LogRepository> = Arc::new(store);

        Ok(Self {
            service: LogService::new(repository),
            cors_origin,
        })
    }
}
