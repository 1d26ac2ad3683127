use std::path::Path;

use crate::adapters::records::json_record_file::JsonRecordFile;
use crate::cli::commands::workspace::{Workspace, resolve_actor};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::validation::validate_record_id;

/// Execute the `ordertrail snapshot` command.
///
/// Stores the current state of an order so the next `commit` can
/// compare against it.
pub fn execute(dir: &Path, actor: Option<&str>, order_id: &str, file: &Path) -> Result<()> {
    validate_record_id(order_id)?;
    let ws = Workspace::open(dir)?;

    if !ws.enabled() {
        output::warning("Tracking is disabled in config.toml, no snapshot taken");
        return Ok(());
    }

    let record = JsonRecordFile::new(file).load()?;
    let tracker = ws.tracker(resolve_actor(actor));

    if tracker.begin(order_id, &record) {
        output::success(&format!(
            "Snapshot of order {order_id} stored (valid for {}s)",
            ws.config.tracking.snapshot_ttl_secs
        ));
    } else {
        output::warning(&format!(
            "Could not store a snapshot of order {order_id}; the next commit will record nothing"
        ));
    }

    Ok(())
}
