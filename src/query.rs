//! Filtering, ordering and aggregation over an in-memory log collection.

use crate::domain::{FilterSpec, LevelCounts, LogEntry, LogLevel, StatsSummary};
use crate::validation::{FilterError, parse_date_time};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Number of entries reported as recent activity.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Levels in their canonical order.
#[must_use]
pub fn levels() -> [LogLevel; 4] {
    LogLevel::ALL
}

/// Apply `spec` to `collection` and return the matches newest first.
#[must_use]
pub fn query(collection: Vec<LogEntry>, spec: &FilterSpec) -> Vec<LogEntry> {
    let mut logs = collection;

    if let Some(level) = spec.level {
        logs.retain(|log| log.level == level);
    }

    if let Some(message) = &spec.message {
        let needle = message.to_lowercase();
        logs.retain(|log| log.message.to_lowercase().contains(&needle));
    }

    if let Some(resource_id) = &spec.resource_id {
        logs.retain(|log| log.resource_id.contains(resource_id.as_str()));
    }

    if let Some(start) = &spec.timestamp_start {
        logs.retain(|log| log.timestamp.as_str() >= start.as_str());
    }

    if let Some(end) = &spec.timestamp_end {
        logs.retain(|log| log.timestamp.as_str() <= end.as_str());
    }

    sort_newest_first(&mut logs);
    logs
}

/// Stable sort by timestamp, newest first.
///
/// Timestamps are compared as instants so differing offsets order correctly.
/// Entries whose timestamp cannot be parsed go last; equal keys keep their
/// insertion order.
pub fn sort_newest_first(logs: &mut Vec<LogEntry>) {
    let mut keyed: Vec<(Option<DateTime<Utc>>, LogEntry)> = logs
        .drain(..)
        .map(|log| (parse_instant(&log.timestamp), log))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    logs.extend(keyed.into_iter().map(|(_, log)| log));
}

fn parse_instant(timestamp: &str) -> Option<DateTime<Utc>> {
    parse_date_time(timestamp).map(|dt| dt.with_timezone(&Utc))
}

/// Derive counts and recent activity over the whole collection.
#[must_use]
pub fn stats(collection: &[LogEntry]) -> StatsSummary {
    let mut by_level = LevelCounts::default();
    let mut by_resource: BTreeMap<String, usize> = BTreeMap::new();

    for log in collection {
        by_level.increment(log.level);
        *by_resource.entry(log.resource_id.clone()).or_default() += 1;
    }

    let mut recent_activity = collection.to_vec();
    sort_newest_first(&mut recent_activity);
    recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

    StatsSummary {
        total: collection.len(),
        by_level,
        by_resource,
        recent_activity,
    }
}

/// Entries at exactly `level`.
///
/// # Errors
/// Returns `FilterError::InvalidLevel` when `level` is not a known level name.
pub fn by_level(collection: Vec<LogEntry>, level: &str) -> Result<Vec<LogEntry>, FilterError> {
    let level = level
        .parse::<LogLevel>()
        .map_err(|_| FilterError::InvalidLevel(level.to_string()))?;
    Ok(query(collection, &FilterSpec::level(level)))
}

#[must_use]
pub fn by_resource(collection: Vec<LogEntry>, resource_id: &str) -> Vec<LogEntry> {
    query(collection, &FilterSpec::resource(resource_id))
}

#[must_use]
pub fn search_by_message(collection: Vec<LogEntry>, q: &str) -> Vec<LogEntry> {
    query(collection, &FilterSpec::message(q))
}

#[must_use]
pub fn by_time_range(
    collection: Vec<LogEntry>,
    start: Option<&str>,
    end: Option<&str>,
) -> Vec<LogEntry> {
    let spec = FilterSpec::time_range(start.map(str::to_string), end.map(str::to_string));
    query(collection, &spec)
}
