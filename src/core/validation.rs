use crate::core::errors::{OrderTrailError, Result};

/// Order ids end up in file names, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_record_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(OrderTrailError::InvalidRecordId { id: id.to_string() })
    }
}

/// Reject file names that could escape the data directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    if invalid {
        return Err(OrderTrailError::InvalidConfig {
            detail: format!("{what} must be a plain file name, got '{name}'"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ids() {
        for id in ["1001", "order-17", "A_b-9"] {
            assert!(validate_record_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_path_like_ids() {
        for id in ["", "../1001", "10/01", "10 01", "ä"] {
            assert!(
                matches!(
                    validate_record_id(id),
                    Err(OrderTrailError::InvalidRecordId { .. })
                ),
                "{id:?} should be rejected"
            );
        }
        assert!(validate_record_id(&"9".repeat(65)).is_err());
    }

    #[test]
    fn filename_validation() {
        assert!(validate_simple_filename("changes.log", "log file").is_ok());
        assert!(validate_simple_filename("../changes.log", "log file").is_err());
        assert!(validate_simple_filename("..", "log file").is_err());
        assert!(validate_simple_filename("", "log file").is_err());
    }
}
