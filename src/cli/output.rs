use colored::{ColoredString, Colorize};

use crate::core::models::change_event::{ChangeEvent, ChangeKind};
use crate::core::models::log_entry::LogEntry;
use crate::core::services::formatter::{field_label, format_for_display, format_for_storage};

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Action label colored by what happened to the order.
pub fn action_label(kind: ChangeKind) -> ColoredString {
    let label = kind.label();
    match kind {
        ChangeKind::OrderCreated
        | ChangeKind::ProductAdded
        | ChangeKind::ShippingAdded
        | ChangeKind::CouponAdded
        | ChangeKind::FeeAdded
        | ChangeKind::NoteAdded => label.green(),
        ChangeKind::ProductRemoved
        | ChangeKind::ShippingRemoved
        | ChangeKind::CouponRemoved
        | ChangeKind::FeeRemoved
        | ChangeKind::NoteDeleted
        | ChangeKind::OrderRefunded => label.red(),
        ChangeKind::StatusChanged => label.cyan(),
        _ => label.yellow(),
    }
}

/// Print a classified event that has not been stored.
pub fn print_event(event: &ChangeEvent) {
    println!("  {}", action_label(event.kind));

    match &event.payload {
        Some(payload) => {
            for (field, change) in payload {
                print_change(
                    &field_label(field),
                    format_for_storage(&change.old).as_deref(),
                    format_for_storage(&change.new).as_deref(),
                    event.kind,
                    Some(field.as_str()),
                );
            }
        }
        None => {
            let field = event.field_name.as_deref();
            print_change(
                &field.map(field_label).unwrap_or_default(),
                format_for_storage(&event.old_value).as_deref(),
                format_for_storage(&event.new_value).as_deref(),
                event.kind,
                field,
            );
        }
    }
}

/// Print one change log entry as a header row plus its value lines.
pub fn print_entry(entry: &LogEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let user = match &entry.email {
        Some(email) => format!("{} <{email}>", entry.user),
        None => entry.user.clone(),
    };

    println!(
        "  {} {} {} order {} {} {}",
        format!("#{}", entry.id).dimmed(),
        date.to_string().dimmed(),
        "│".dimmed(),
        entry.order_id.bold(),
        action_label(entry.action),
        format!("by {user}").dimmed(),
    );

    if let Some(serde_json::Value::Object(payload)) = &entry.additional_data {
        for (field, change) in payload {
            print_change(
                &field_label(field),
                json_to_stored(change.get("old")).as_deref(),
                json_to_stored(change.get("new")).as_deref(),
                entry.action,
                Some(field.as_str()),
            );
        }
        return;
    }

    let field = entry.field_name.as_deref();
    print_change(
        &field.map(field_label).unwrap_or_default(),
        entry.old_value.as_deref(),
        entry.new_value.as_deref(),
        entry.action,
        field,
    );
}

fn print_change(
    label: &str,
    old: Option<&str>,
    new: Option<&str>,
    kind: ChangeKind,
    field: Option<&str>,
) {
    let old = format_for_display(old, kind, field);
    let new = format_for_display(new, kind, field);
    let label = if label.is_empty() {
        String::new()
    } else {
        format!("{label}: ")
    };

    println!("      {label}{} → {}", old.red(), new.green());
}

fn json_to_stored(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
