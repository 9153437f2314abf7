use serde_json::Value;

use super::format_value;

/// Print just the headline answer of a diagnosis.
///
/// Looks for the verdict-like fields first, then falls back to the first
/// field of the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "judgment",
        "diagnosisType",
        "bestScenario",
        "totalEstimate",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            match map.get(*key) {
                // The MAO judgment is an object keyed by its verdict id
                Some(Value::Object(inner)) => {
                    if let Some(id) = inner.get("id") {
                        return format_value(id);
                    }
                }
                Some(val) if !val.is_null() => return format_value(val),
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_value(val));
        }
    }

    format_value(result_obj)
}
