use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Duration, Utc};

use crate::adapters::log_store::json_log_store::JsonLogStore;
use crate::adapters::snapshots::file_snapshot_store::FileSnapshotStore;
use crate::config::app_config::{AppConfig, LogSection};
use crate::core::errors::Result;
use crate::core::models::log_entry::Actor;
use crate::core::services::classifier::ChangeClassifier;
use crate::core::services::tracker::ChangeTracker;

/// An initialized `.ordertrail/` directory with its stores.
pub struct Workspace {
    pub config: AppConfig,
    pub snapshots: FileSnapshotStore,
    pub log: JsonLogStore,
}

impl Workspace {
    /// Load `config.toml` from `dir` and build the stores it describes.
    pub fn open(dir: &Path) -> Result<Self> {
        let config = AppConfig::load(dir)?;

        let mut snapshots = FileSnapshotStore::new(&dir.join("snapshots"));
        if let Some(ttl) = i64::try_from(config.tracking.snapshot_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
        {
            snapshots = snapshots.with_ttl(ttl);
        }
        let log = JsonLogStore::from_config(dir, config.log.as_ref());

        Ok(Self {
            config,
            snapshots,
            log,
        })
    }

    pub fn enabled(&self) -> bool {
        self.config.tracking.enabled
    }

    pub fn log_section(&self) -> LogSection {
        self.config.log_section()
    }

    pub fn classifier(&self) -> ChangeClassifier {
        ChangeClassifier::new(self.config.tracking.custom_meta_fields.clone())
    }

    pub fn tracker(&self, actor: Actor) -> ChangeTracker<'_> {
        ChangeTracker::new(&self.snapshots, &self.log, self.classifier(), actor)
            .with_enabled(self.enabled())
    }
}

/// Oldest timestamp kept when retaining `days` days of history.
pub fn retention_cutoff(days: u32) -> DateTime<Utc> {
    Utc::now()
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Resolve who is making the change.
///
/// An explicit `--actor` wins; `"Name <email>"` is split into its parts.
/// Otherwise the git identity is used.
pub fn resolve_actor(explicit: Option<&str>) -> Actor {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_actor(raw),
        None => {
            let (name, email) = git_author();
            Actor { name, email }
        }
    }
}

fn parse_actor(raw: &str) -> Actor {
    if let Some((name, rest)) = raw.split_once('<')
        && let Some(email) = rest.strip_suffix('>')
    {
        let email = email.trim();
        return Actor {
            name: name.trim().to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
        };
    }

    Actor {
        name: raw.to_string(),
        email: None,
    }
}

/// Read the git user name and email from the local/global config.
/// Returns `("unknown", None)` if git is not available.
fn git_author() -> (String, Option<String>) {
    let read = |key: &str| {
        Command::new("git")
            .args(["config", key])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let name = read("user.name").unwrap_or_else(|| "unknown".to_string());
    (name, read("user.email"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app_config::DEFAULT_CONFIG;
    use tempfile::TempDir;

    #[test]
    fn actor_with_email() {
        let actor = resolve_actor(Some("Shop Manager <manager@shop.test>"));
        assert_eq!(actor.name, "Shop Manager");
        assert_eq!(actor.email.as_deref(), Some("manager@shop.test"));
    }

    #[test]
    fn actor_plain_name() {
        let actor = resolve_actor(Some("  system "));
        assert_eq!(actor.name, "system");
        assert_eq!(actor.email, None);
    }

    #[test]
    fn open_uses_configured_log_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            DEFAULT_CONFIG.replace("changes.log", "orders.log"),
        )
        .unwrap();

        let ws = Workspace::open(tmp.path()).unwrap();

        assert_eq!(ws.log.path(), tmp.path().join("orders.log"));
        assert!(ws.enabled());
    }
}
