use super::LogLevel;

/// Optional constraints applied to a log collection by the query engine.
///
/// Every field left as `None` places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Exact level match.
    pub level: Option<LogLevel>,
    /// Case-insensitive substring of the message.
    pub message: Option<String>,
    /// Case-sensitive substring of the resource id.
    pub resource_id: Option<String>,
    /// Inclusive lower bound, compared lexicographically.
    pub timestamp_start: Option<String>,
    /// Inclusive upper bound, compared lexicographically.
    pub timestamp_end: Option<String>,
}

impl FilterSpec {
    #[must_use]
    pub fn level(level: LogLevel) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn message(q: impl Into<String>) -> Self {
        Self {
            message: Some(q.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn resource(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn time_range(start: Option<String>, end: Option<String>) -> Self {
        Self {
            timestamp_start: start,
            timestamp_end: end,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
