use chrono::{DateTime, NaiveDateTime};

use crate::core::models::change_event::ChangeKind;
use crate::core::models::value::Value;
use crate::core::services::differ::is_numeric_str;

const PRICE_FIELDS: [&str; 8] = [
    "total",
    "tax",
    "price",
    "cost",
    "subtotal",
    "shipping_total",
    "tax_total",
    "discount_total",
];

const DATE_FIELD_HINTS: [&str; 6] = ["date", "timestamp", "created", "modified", "completed", "paid"];

/// Flatten a value for the change log.
///
/// `Null` stays absent, containers become compact JSON, booleans
/// become `"1"` / `"0"`, numbers and strings are kept verbatim.
pub fn format_for_storage(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::List(_) | Value::Map(_) => Some(serde_json::Value::from(value).to_string()),
    }
}

/// Render a stored value for a listing.
pub fn format_for_display(stored: Option<&str>, action: ChangeKind, field: Option<&str>) -> String {
    let Some(raw) = stored.filter(|s| !s.is_empty()) else {
        return "(empty)".to_string();
    };

    if raw.starts_with(['{', '['])
        && let Ok(json) = serde_json::from_str::<serde_json::Value>(raw)
        && (json.is_object() || json.is_array())
    {
        return format_json(&json);
    }

    let field = field.unwrap_or("");
    if action.is_price() || PRICE_FIELDS.contains(&field) {
        return format_price(raw);
    }

    if is_date_field(field) {
        return format_date(raw);
    }

    raw.to_string()
}

/// Two decimals for numeric amounts; anything else is returned unchanged.
pub fn format_price(raw: &str) -> String {
    if !is_numeric_str(raw) {
        return raw.to_string();
    }
    match raw.parse::<f64>() {
        Ok(amount) => format!("{amount:.2}"),
        Err(_) => raw.to_string(),
    }
}

/// `YYYY-MM-DD HH:MM` for RFC 3339 or `YYYY-MM-DD HH:MM:SS` input.
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

fn is_date_field(field: &str) -> bool {
    let lower = field.to_lowercase();
    DATE_FIELD_HINTS.iter().any(|hint| lower.contains(hint))
}

fn format_json(json: &serde_json::Value) -> String {
    let pairs: Vec<(String, &serde_json::Value)> = match json {
        serde_json::Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        other => return other.to_string(),
    };

    pairs
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                format!("{key}: {{{}}}", format_json(value))
            }
            serde_json::Value::String(s) => format!("{key}: {s}"),
            serde_json::Value::Null => format!("{key}: "),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable name for a field.
pub fn field_label(field: &str) -> String {
    let known = match field {
        "status" => Some("Status"),
        "total" => Some("Total"),
        "tax_total" => Some("Tax Total"),
        "shipping_total" => Some("Shipping Total"),
        "discount_total" => Some("Discount Total"),
        "payment_method" => Some("Payment Method"),
        "shipping_method" | "shipping_methods" => Some("Shipping Method"),
        "billing_address" => Some("Billing Address"),
        "shipping_address" => Some("Shipping Address"),
        "customer_note" => Some("Customer Note"),
        "items" => Some("Items"),
        "currency" => Some("Currency"),
        _ => None,
    };
    if let Some(label) = known {
        return label.to_string();
    }

    field
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
