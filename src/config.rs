use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

const DEFAULT_HTTP_PORT: u16 = 4000;
const DEFAULT_DB_PATH: &str = "./data/logs.json";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP server port
    pub http_port: u16,
    /// Backing file holding the log collection
    pub db_path: PathBuf,
    /// Origin allowed by CORS (credentials enabled)
    pub cors_origin: String,
    pub environment: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        validate_port(self.http_port)?;
        validate_path(&self.db_path)?;
        validate_origin(&self.cors_origin)?;
        Ok(())
    }
}

fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        bail!("Port cannot be 0");
    }
    Ok(())
}

fn validate_path(path: &std::path::Path) -> Result<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        bail!("Database path cannot be empty");
    }
    Ok(())
}

fn validate_origin(origin: &str) -> Result<()> {
    if origin.trim().is_empty() {
        bail!("CORS origin cannot be empty");
    }
    Ok(())
}

/// Port the server listens on: `HTTP_PORT`, then `PORT`, then 4000.
pub fn http_port() -> Result<u16> {
    match env::var("HTTP_PORT").or_else(|_| env::var("PORT")) {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("Invalid HTTP port: {raw}")),
        Err(_) => Ok(DEFAULT_HTTP_PORT),
    }
}

pub fn get_configuration() -> Result<Settings> {
    let defaults = Settings::default();

    let settings = Settings {
        http_port: http_port()?,
        db_path: env::var("DB_PATH").map_or(defaults.db_path, PathBuf::from),
        cors_origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
        environment: env::var("APP_ENV").unwrap_or(defaults.environment),
    };

    // Validate settings before returning
    settings.validate().context("Invalid settings")?;

    Ok(settings)
}
