pub mod filter;
pub mod log_entry;
pub mod stats;

pub use filter::FilterSpec;
pub use log_entry::{LogEntry, LogLevel, UnknownLevel};
pub use stats::{LevelCounts, StatsSummary};
