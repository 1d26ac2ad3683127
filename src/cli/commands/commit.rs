use std::path::Path;

use crate::adapters::records::json_record_file::JsonRecordFile;
use crate::cli::commands::workspace::{Workspace, resolve_actor, retention_cutoff};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::log_store::LogStore;
use crate::core::traits::record_provider::RecordProvider;
use crate::core::validation::validate_record_id;

/// Execute the `ordertrail commit` command.
///
/// Compares the order's updated state with its snapshot, records every
/// change, and drops the snapshot. A missing snapshot or a missing
/// order file records nothing.
pub fn execute(dir: &Path, actor: Option<&str>, order_id: &str, file: &Path) -> Result<()> {
    validate_record_id(order_id)?;
    let ws = Workspace::open(dir)?;
    let current = JsonRecordFile::new(file).fetch(order_id)?;
    let tracker = ws.tracker(resolve_actor(actor));

    let report = tracker.finish(order_id, current.as_ref());

    output::header(&format!("ordertrail commit: order {order_id}"));

    if !ws.enabled() {
        output::warning("Tracking is disabled in config.toml, nothing recorded");
        return Ok(());
    }
    if !report.snapshot_found {
        output::warning(&format!(
            "No snapshot for order {order_id} (never taken or expired), nothing to compare"
        ));
        return Ok(());
    }
    if current.is_none() {
        output::warning(&format!("{} not found, nothing to compare", file.display()));
        return Ok(());
    }
    if report.events.is_empty() {
        output::success("No changes detected");
        return Ok(());
    }

    for event in &report.events {
        output::print_event(event);
    }
    println!();

    output::success(&format!("Recorded {} change(s)", report.logged.len()));
    if report.failed > 0 {
        output::warning(&format!(
            "{} change(s) could not be written to the change log",
            report.failed
        ));
    }

    let log_section = ws.log_section();
    if log_section.auto_cleanup {
        match ws.log.purge_before(retention_cutoff(log_section.retention_days)) {
            Ok(0) => {}
            Ok(n) => tracing::debug!(purged = n, "old change log entries removed"),
            Err(e) => output::warning(&format!("Could not purge old entries: {e}")),
        }
    }

    Ok(())
}
