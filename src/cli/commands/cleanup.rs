use std::path::Path;

use crate::cli::commands::workspace::{Workspace, retention_cutoff};
use crate::cli::output;
use crate::core::errors::{OrderTrailError, Result};
use crate::core::traits::log_store::LogStore;

/// Execute the `ordertrail cleanup` command.
///
/// Removes entries older than `days` (default: `log.retention_days`).
pub fn execute(dir: &Path, days: Option<u32>) -> Result<()> {
    let ws = Workspace::open(dir)?;
    let days = days.unwrap_or(ws.log_section().retention_days);
    if days == 0 {
        return Err(OrderTrailError::InvalidConfig {
            detail: "--days must be at least 1".into(),
        });
    }

    let removed = ws.log.purge_before(retention_cutoff(days))?;
    tracing::debug!(log = %ws.log.path().display(), removed, days, "retention purge");

    output::success(&format!(
        "Removed {removed} entr{} older than {days} days",
        if removed == 1 { "y" } else { "ies" }
    ));

    Ok(())
}
