use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Output format of the process logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// JSON unless `RUST_LOG_FORMAT` names something else.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("json") => LogFormat::Json,
            Some(_) => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` directives are honoured on top
/// of an INFO baseline.
pub fn init_tracing() {
    let format = LogFormat::from_env_value(std::env::var("RUST_LOG_FORMAT").ok().as_deref());
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            )
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_defaults_to_json() {
        assert_eq!(LogFormat::from_env_value(None), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some("text")), LogFormat::Pretty);
    }
}
