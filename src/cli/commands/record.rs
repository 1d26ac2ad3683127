use std::path::Path;

use crate::cli::commands::workspace::{Workspace, resolve_actor};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::change_event::ChangeKind;
use crate::core::models::value::Value;
use crate::core::validation::validate_record_id;

/// Execute the `ordertrail record` command.
///
/// Writes a single entry for a change that happened outside a
/// snapshot/commit cycle, such as a coupon or a note.
pub fn execute(
    dir: &Path,
    actor: Option<&str>,
    order_id: &str,
    action: &str,
    field: Option<&str>,
    old: Option<&str>,
    new: Option<&str>,
) -> Result<()> {
    validate_record_id(order_id)?;
    let kind: ChangeKind = action.parse()?;
    let ws = Workspace::open(dir)?;

    if !ws.enabled() {
        output::warning("Tracking is disabled in config.toml, nothing recorded");
        return Ok(());
    }

    let tracker = ws.tracker(resolve_actor(actor));
    let to_value = |v: Option<&str>| v.map(Value::from).unwrap_or_default();

    match tracker.log_change(order_id, kind, field, to_value(old), to_value(new), None) {
        Some(id) => output::success(&format!("Recorded #{id}: {} on order {order_id}", kind.label())),
        None => output::warning("Could not write to the change log"),
    }

    Ok(())
}
