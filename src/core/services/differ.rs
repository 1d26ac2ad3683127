use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::value::Value;

/// Plain base-10 numbers: optional sign, digits with an optional
/// fraction, optional exponent. No whitespace, separators or hex.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("numeric pattern is valid")
});

/// Whether a string holds a base-10 number, e.g. `"10"`, `"-3.5"`, `"1e3"`.
pub fn is_numeric_str(s: &str) -> bool {
    NUMERIC.is_match(s)
}

/// Exact integer reading, for integers and integer-like strings.
fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        Value::String(s) if is_numeric_str(s) => s.parse().ok(),
        _ => None,
    }
}

/// Numeric reading of a value, if it is a number or a numeric string.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_numeric_str(s) => s.parse().ok(),
        _ => None,
    }
}

/// Report whether two captured values differ.
///
/// Rules, in order:
/// 1. Two empty-equivalent values (`null`, `""`, `[]`, `{}`) never differ.
/// 2. If either side is a container, compare structurally: element
///    count, then the sorted key sets, then each key recursively.
///    A scalar on the other side counts as an empty container.
/// 3. Two numeric values (numbers or numeric strings) compare by value,
///    so `"10"`, `10` and `"10.0"` are equal. Two integers compare
///    exactly, without going through floating point.
/// 4. Anything else compares strictly: same kind and same content.
pub fn differs(old: &Value, new: &Value) -> bool {
    if old.is_empty_equivalent() && new.is_empty_equivalent() {
        return false;
    }

    if old.is_container() || new.is_container() {
        return containers_differ(old, new);
    }

    if let (Some(a), Some(b)) = (integer(old), integer(new)) {
        return a != b;
    }

    if let (Some(a), Some(b)) = (numeric(old), numeric(new)) {
        return a != b;
    }

    match (old, new) {
        (Value::String(a), Value::String(b)) => a != b,
        (Value::Bool(a), Value::Bool(b)) => a != b,
        (Value::Null, Value::Null) => false,
        _ => true,
    }
}

fn containers_differ(old: &Value, new: &Value) -> bool {
    let old_entries = old.entries();
    let new_entries = new.entries();

    if old_entries.len() != new_entries.len() {
        return true;
    }

    let old_keys: BTreeSet<&str> = old_entries.iter().map(|(k, _)| k.as_str()).collect();
    let new_keys: BTreeSet<&str> = new_entries.iter().map(|(k, _)| k.as_str()).collect();
    if old_keys != new_keys {
        return true;
    }

    old_entries.iter().any(|(key, old_value)| match new.get(key) {
        Some(new_value) => differs(old_value, new_value),
        None => true,
    })
}
