use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::{OrderTrailError, Result};
use crate::core::models::order_record::OrderRecord;
use crate::core::traits::snapshot_store::SnapshotStore;
use crate::core::validation::validate_record_id;

/// Default time-to-live of a snapshot.
pub const DEFAULT_TTL_SECS: i64 = 600;

/// On-disk form of one snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSnapshot {
    stored_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    record: OrderRecord,
}

/// Snapshot store keeping one JSON file per order.
///
/// Files live at `{dir}/{record_id}.json`. Each write goes to a temp
/// file in the same directory and is then renamed over the target, so
/// a reader never sees half a snapshot.
pub struct FileSnapshotStore {
    dir: PathBuf,
    ttl: Duration,
}

impl FileSnapshotStore {
    /// Create a store under `dir` with the default 10 minute TTL.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }

    /// Replace the time-to-live applied to snapshots stored from now on.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn path_for(&self, record_id: &str) -> Result<PathBuf> {
        validate_record_id(record_id)?;
        Ok(self.dir.join(format!("{record_id}.json")))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn store(&self, record_id: &str, snapshot: &OrderRecord) -> Result<()> {
        let path = self.path_for(record_id)?;
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| OrderTrailError::SnapshotError {
                detail: format!("Snapshot TTL of {}s is out of range", self.ttl.num_seconds()),
            })?;
        let stored = StoredSnapshot {
            stored_at: now,
            expires_at,
            record: snapshot.clone(),
        };

        let json = serde_json::to_vec(&stored).map_err(|e| OrderTrailError::SnapshotError {
            detail: format!("Failed to serialize snapshot for order {record_id}: {e}"),
        })?;

        fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&path).map_err(|e| OrderTrailError::SnapshotError {
            detail: format!("Cannot write snapshot {}: {e}", path.display()),
        })?;

        tracing::debug!(record_id, expires_at = %stored.expires_at, "snapshot stored");
        Ok(())
    }

    fn get(&self, record_id: &str) -> Result<Option<OrderRecord>> {
        let path = self.path_for(record_id)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read(&path)?;
        let stored: StoredSnapshot =
            serde_json::from_slice(&content).map_err(|e| OrderTrailError::SnapshotError {
                detail: format!("Malformed snapshot {}: {e}", path.display()),
            })?;

        if Utc::now() >= stored.expires_at {
            tracing::debug!(record_id, "snapshot expired");
            fs::remove_file(&path)?;
            return Ok(None);
        }

        Ok(Some(stored.record))
    }

    fn delete(&self, record_id: &str) -> Result<()> {
        let path = self.path_for(record_id)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::value::Value;
    use tempfile::TempDir;

    fn record(status: &str) -> OrderRecord {
        OrderRecord {
            status: Value::from(status),
            ..OrderRecord::default()
        }
    }

    #[test]
    fn store_and_get() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        store.store("1001", &record("pending")).unwrap();

        assert_eq!(store.get("1001").unwrap(), Some(record("pending")));
    }

    #[test]
    fn get_missing_is_absent() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        assert_eq!(store.get("1001").unwrap(), None);
    }

    #[test]
    fn empty_snapshot_is_not_absent() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        store.store("1001", &OrderRecord::default()).unwrap();

        assert_eq!(store.get("1001").unwrap(), Some(OrderRecord::default()));
    }

    #[test]
    fn store_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        store.store("1001", &record("pending")).unwrap();
        store.store("1001", &record("processing")).unwrap();

        assert_eq!(store.get("1001").unwrap(), Some(record("processing")));
    }

    #[test]
    fn stored_copy_is_independent_of_caller() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        let mut live = record("pending");
        store.store("1001", &live).unwrap();
        live.status = Value::from("completed");

        assert_eq!(store.get("1001").unwrap(), Some(record("pending")));
    }

    #[test]
    fn expired_snapshot_is_absent_and_removed() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path()).with_ttl(Duration::zero());

        store.store("1001", &record("pending")).unwrap();

        assert_eq!(store.get("1001").unwrap(), None);
        assert!(!tmp.path().join("1001.json").exists());
    }

    #[test]
    fn out_of_range_ttl_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let ttl = Duration::try_seconds(9_000_000_000_000_000).unwrap();
        let store = FileSnapshotStore::new(tmp.path()).with_ttl(ttl);

        let result = store.store("1001", &record("pending"));

        assert!(matches!(result, Err(OrderTrailError::SnapshotError { .. })));
        assert_eq!(store.get("1001").unwrap(), None);
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        store.store("1001", &record("pending")).unwrap();
        store.delete("1001").unwrap();
        store.delete("1001").unwrap();

        assert_eq!(store.get("1001").unwrap(), None);
    }

    #[test]
    fn snapshots_are_keyed_by_id() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        store.store("1001", &record("pending")).unwrap();
        store.store("1002", &record("on-hold")).unwrap();

        assert_eq!(store.get("1001").unwrap(), Some(record("pending")));
        assert_eq!(store.get("1002").unwrap(), Some(record("on-hold")));
    }

    #[test]
    fn rejects_path_traversal_ids() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(tmp.path());

        let result = store.store("../escape", &record("pending"));
        assert!(matches!(result, Err(OrderTrailError::InvalidRecordId { .. })));
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(&tmp.path().join("snapshots"));

        store.store("1001", &record("pending")).unwrap();

        assert!(tmp.path().join("snapshots/1001.json").exists());
    }
}
