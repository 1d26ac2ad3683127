use chrono::{DateTime, Utc};

use crate::core::errors::Result;
use crate::core::models::log_entry::{LogEntry, LogFilter};

/// Port for the append-only change log.
pub trait LogStore: Send + Sync {
    /// Append an entry, assigning it the next id. Returns that id.
    fn append(&self, entry: LogEntry) -> Result<u64>;

    /// Entries matching the filter, sorted and paged as it asks.
    fn query(&self, filter: &LogFilter) -> Result<Vec<LogEntry>>;

    /// Number of entries matching the filter, ignoring paging.
    fn count(&self, filter: &LogFilter) -> Result<usize>;

    /// Remove entries by id. Returns how many were removed.
    fn delete(&self, ids: &[u64]) -> Result<usize>;

    /// Remove entries older than `cutoff`. Returns how many were removed.
    fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}
