use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{OrderTrailError, Result};
use crate::core::validation::validate_simple_filename;

/// Top-level configuration read from `.ordertrail/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub ordertrail: OrderTrailSection,
    #[serde(default)]
    pub tracking: TrackingSection,
    pub log: Option<LogSection>,
}

impl AppConfig {
    /// Load the configuration from `{data_dir}/config.toml`.
    ///
    /// After parsing, validates the log file name so a tampered config
    /// cannot point writes outside the data directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.toml");
        if !config_path.exists() {
            return Err(OrderTrailError::NotInitialized {
                dir: data_dir.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| OrderTrailError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.ordertrail.format_version > CURRENT_FORMAT_VERSION {
            return Err(OrderTrailError::FormatVersionTooNew {
                project_version: config.ordertrail.format_version,
                supported_version: CURRENT_FORMAT_VERSION,
            });
        }

        if !(1..=MAX_SNAPSHOT_TTL_SECS).contains(&config.tracking.snapshot_ttl_secs) {
            return Err(OrderTrailError::InvalidConfig {
                detail: format!(
                    "tracking.snapshot_ttl_secs must be between 1 and {MAX_SNAPSHOT_TTL_SECS}, got {}",
                    config.tracking.snapshot_ttl_secs
                ),
            });
        }

        if let Some(log) = &config.log {
            validate_simple_filename(&log.log_file, "log file")?;
            if !(10..=100).contains(&log.per_page) {
                return Err(OrderTrailError::InvalidConfig {
                    detail: format!("log.per_page must be between 10 and 100, got {}", log.per_page),
                });
            }
            if log.retention_days == 0 {
                return Err(OrderTrailError::InvalidConfig {
                    detail: "log.retention_days must be at least 1".into(),
                });
            }
        }

        Ok(config)
    }

    /// The `[log]` section, or its defaults.
    pub fn log_section(&self) -> LogSection {
        self.log.clone().unwrap_or_default()
    }
}

/// Longest snapshot lifetime accepted from config (one year).
pub const MAX_SNAPSHOT_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Current format version supported by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Written by `ordertrail init`.
pub const DEFAULT_CONFIG: &str = r#"[ordertrail]
version = "0.1.0"
format_version = 1

[tracking]
enabled = true
snapshot_ttl_secs = 600
# Custom meta keys compared on every commit, e.g. ["_tracking_number"]
custom_meta_fields = []

[log]
log_file = "changes.log"
per_page = 20
retention_days = 90
auto_cleanup = false
"#;

/// The `[ordertrail]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderTrailSection {
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
}

fn default_format_version() -> u32 {
    1
}

/// The `[tracking]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingSection {
    /// When false, nothing is written to the change log.
    pub enabled: bool,
    pub snapshot_ttl_secs: u64,
    pub custom_meta_fields: Vec<String>,
}

impl Default for TrackingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            snapshot_ttl_secs: 600,
            custom_meta_fields: Vec::new(),
        }
    }
}

/// The `[log]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub log_file: String,
    pub per_page: usize,
    pub retention_days: u32,
    /// Purge entries past the retention window after each commit.
    pub auto_cleanup: bool,
}

impl LogSection {
    pub const DEFAULT_LOG_FILE: &'static str = "changes.log";
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            log_file: Self::DEFAULT_LOG_FILE.to_string(),
            per_page: 20,
            retention_days: 90,
            auto_cleanup: false,
        }
    }
}
