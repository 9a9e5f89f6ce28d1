use super::{LogEntry, LogLevel};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate counts over a collection. Derived on demand, never persisted.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total: usize,
    pub by_level: LevelCounts,
    pub by_resource: BTreeMap<String, usize>,
    pub recent_activity: Vec<LogEntry>,
}

/// Per-level counts. All four levels are always present, serialized in
/// level order.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub error: usize,
    pub warn: usize,
    pub info: usize,
    pub debug: usize,
}

impl LevelCounts {
    pub fn increment(&mut self, level: LogLevel) {
        *self.slot(level) += 1;
    }

    #[must_use]
    pub fn get(&self, level: LogLevel) -> usize {
        match level {
            LogLevel::Error => self.error,
            LogLevel::Warn => self.warn,
            LogLevel::Info => self.info,
            LogLevel::Debug => self.debug,
        }
    }

    #[must_use]
    pub fn sum(&self) -> usize {
        self.error + self.warn + self.info + self.debug
    }

    fn slot(&mut self, level: LogLevel) -> &mut usize {
        match level {
            LogLevel::Error => &mut self.error,
            LogLevel::Warn => &mut self.warn,
            LogLevel::Info => &mut self.info,
            LogLevel::Debug => &mut self.debug,
        }
    }
}
