use std::path::Path;

use crate::cli::commands::workspace::Workspace;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::log_store::LogStore;

/// Execute the `ordertrail delete` command.
pub fn execute(dir: &Path, ids: &[u64]) -> Result<()> {
    let ws = Workspace::open(dir)?;
    let removed = ws.log.delete(ids)?;

    if removed == 0 {
        output::warning("No matching entries");
    } else {
        output::success(&format!("Deleted {removed} entr{}", if removed == 1 { "y" } else { "ies" }));
    }

    Ok(())
}
