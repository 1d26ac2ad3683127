use std::path::{Path, PathBuf};

use crate::core::errors::{OrderTrailError, Result};
use crate::core::models::order_record::OrderRecord;
use crate::core::traits::record_provider::RecordProvider;

/// Reads an order's current state from a JSON document on disk.
///
/// The document is the host platform's normalized export of one order.
/// A missing file means the order could not be found.
pub struct JsonRecordFile {
    path: PathBuf,
}

impl JsonRecordFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Parse the document, failing if it does not exist.
    pub fn load(&self) -> Result<OrderRecord> {
        self.read()?.ok_or_else(|| OrderTrailError::FileNotFound {
            path: self.path.clone(),
        })
    }

    fn read(&self) -> Result<Option<OrderRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&content).map_err(|e| OrderTrailError::ParseError {
            file: self.path.clone(),
            detail: e.to_string(),
        })?;
        Ok(Some(record))
    }
}

impl RecordProvider for JsonRecordFile {
    fn fetch(&self, _record_id: &str) -> Result<Option<OrderRecord>> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::value::Value;
    use tempfile::TempDir;

    #[test]
    fn fetch_parses_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("order.json");
        std::fs::write(&path, r#"{"status": "pending", "total": "10.00"}"#).unwrap();

        let record = JsonRecordFile::new(&path).fetch("1001").unwrap().unwrap();

        assert_eq!(record.status, Value::from("pending"));
        assert_eq!(record.total, Value::from("10.00"));
    }

    #[test]
    fn fetch_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let provider = JsonRecordFile::new(&tmp.path().join("missing.json"));

        assert!(provider.fetch("1001").unwrap().is_none());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let provider = JsonRecordFile::new(&tmp.path().join("missing.json"));

        assert!(matches!(
            provider.load(),
            Err(OrderTrailError::FileNotFound { .. })
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("order.json");
        std::fs::write(&path, "status: pending").unwrap();

        assert!(matches!(
            JsonRecordFile::new(&path).fetch("1001"),
            Err(OrderTrailError::ParseError { .. })
        ));
    }
}
