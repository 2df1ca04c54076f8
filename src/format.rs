//! Value presence and label formatting
//!
//! Shared by the tag table, the key tag summary and the preview projector.

use serde_json::Value;

/// Display text for a value that is absent
pub const MISSING_LABEL: &str = "Missing";

/// Check whether a tag value counts as present
///
/// Only a missing value, `null`, or the empty string is absent. `0`,
/// `false`, empty objects and empty arrays are all present.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Render any tag value to display text
///
/// Objects and arrays use compact JSON with their original key order.
pub fn format_value(value: Option<&Value>) -> String {
    if !is_present(value) {
        return MISSING_LABEL.to_string();
    }
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => format_number(n),
        Some(other @ (Value::Object(_) | Value::Array(_))) => other.to_string(),
        _ => MISSING_LABEL.to_string(),
    }
}

/// Integers print as-is; floats drop a trailing `.0`
fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_score).unwrap_or_else(|| n.to_string())
    }
}

/// Natural text for a floating point number (`85`, `72.5`, `-3`, `NaN`)
///
/// Magnitudes of 1e21 and above, or below 1e-6, switch to exponent form
/// (`1e+21`, `2.5e-7`), the same cutoffs browsers use.
pub fn format_score(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }
    // f64's Display already omits ".0" for integral values
    format!("{}", value)
}

/// Convert a camelCase tag key into a readable label
///
/// A space goes before every interior ASCII uppercase letter; casing is kept,
/// so `openGraphTitle` becomes `open Graph Title`.
pub fn to_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }
    label
}
