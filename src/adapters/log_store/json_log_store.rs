use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::app_config::LogSection;
use crate::core::errors::{OrderTrailError, Result};
use crate::core::models::log_entry::{LogEntry, LogFilter, SortField};
use crate::core::traits::log_store::LogStore;

/// Change log that appends entries as JSON lines to a file.
///
/// Each line in the log file is a self-contained JSON object representing
/// one `LogEntry`. Appends never rewrite the file; only bulk delete and
/// retention purge do, through a temp file renamed over the original.
pub struct JsonLogStore {
    log_path: PathBuf,
}

impl JsonLogStore {
    /// Create a store that writes to `{data_dir}/{log_file}`.
    pub fn new(data_dir: &Path, log_file: &str) -> Self {
        Self {
            log_path: data_dir.join(log_file),
        }
    }

    /// Create a store from the `[log]` section, falling back to defaults
    /// if it is missing.
    pub fn from_config(data_dir: &Path, log_section: Option<&LogSection>) -> Self {
        let log_file = log_section
            .map(|l| l.log_file.as_str())
            .unwrap_or(LogSection::DEFAULT_LOG_FILE);
        Self::new(data_dir, log_file)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Read every entry in file order.
    fn read_all(&self) -> Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.log_path).map_err(|e| OrderTrailError::LogStoreError {
            detail: format!("Cannot read change log: {e}"),
        })?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| OrderTrailError::LogStoreError {
                detail: format!("Error reading change log line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let entry: LogEntry =
                serde_json::from_str(trimmed).map_err(|e| OrderTrailError::LogStoreError {
                    detail: format!("Malformed change log entry at line {}: {e}", line_num + 1),
                })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Replace the whole log with `entries`.
    fn rewrite(&self, entries: &[LogEntry]) -> Result<()> {
        let dir = self
            .log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;

        for entry in entries {
            writeln!(tmp, "{}", serialize(entry)?)?;
        }

        tmp.persist(&self.log_path)
            .map_err(|e| OrderTrailError::LogStoreError {
                detail: format!("Cannot rewrite change log at {}: {e}", self.log_path.display()),
            })?;
        Ok(())
    }

    fn matching(&self, filter: &LogFilter) -> Result<Vec<LogEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect())
    }
}

fn serialize(entry: &LogEntry) -> Result<String> {
    serde_json::to_string(entry).map_err(|e| OrderTrailError::LogStoreError {
        detail: format!("Failed to serialize change log entry: {e}"),
    })
}

fn sort_entries(entries: &mut [LogEntry], sort_by: SortField, descending: bool) {
    // Ties keep id order so pages stay stable.
    entries.sort_by(|a, b| {
        let primary = match sort_by {
            SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortField::OrderId => a.order_id.cmp(&b.order_id),
            SortField::Action => a.action.as_str().cmp(b.action.as_str()),
            SortField::User => a.user.to_lowercase().cmp(&b.user.to_lowercase()),
        };
        primary.then(a.id.cmp(&b.id))
    });
    if descending {
        entries.reverse();
    }
}

impl LogStore for JsonLogStore {
    fn append(&self, mut entry: LogEntry) -> Result<u64> {
        let next_id = self
            .read_all()?
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(0)
            + 1;
        entry.id = next_id;

        let line = serialize(&entry)?;

        // Ensure the parent directory exists
        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| OrderTrailError::LogStoreError {
                detail: format!("Cannot open change log at {}: {e}", self.log_path.display()),
            })?;

        writeln!(file, "{line}").map_err(|e| OrderTrailError::LogStoreError {
            detail: format!("Failed to write change log entry: {e}"),
        })?;

        Ok(next_id)
    }

    fn query(&self, filter: &LogFilter) -> Result<Vec<LogEntry>> {
        let mut entries = self.matching(filter)?;
        sort_entries(&mut entries, filter.sort_by, filter.descending);

        let paged = entries.into_iter().skip(filter.offset);
        Ok(match filter.limit {
            Some(limit) => paged.take(limit).collect(),
            None => paged.collect(),
        })
    }

    fn count(&self, filter: &LogFilter) -> Result<usize> {
        Ok(self.matching(filter)?.len())
    }

    fn delete(&self, ids: &[u64]) -> Result<usize> {
        let entries = self.read_all()?;
        let before = entries.len();
        let kept: Vec<LogEntry> = entries.into_iter().filter(|e| !ids.contains(&e.id)).collect();
        let removed = before - kept.len();

        if removed > 0 {
            self.rewrite(&kept)?;
        }
        Ok(removed)
    }

    fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let entries = self.read_all()?;
        let before = entries.len();
        let kept: Vec<LogEntry> = entries
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            self.rewrite(&kept)?;
        }
        Ok(removed)
    }
}
