//! Reusable field filters
//!
//! These filters transform payload field values before validation

use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}

/// Apply a filter to every top-level field of a JSON object
///
/// Non-object payloads pass through unchanged.
pub fn apply_to_fields<F>(payload: Value, filter: F) -> Value
where
    F: Fn(&str, Value) -> Value,
{
    match payload {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(field, value)| {
                    let filtered = filter(&field, value);
                    (field, filtered)
                })
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        assert_eq!(f("name", json!("  hello  ")), json!("hello"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let f = trim();
        assert_eq!(f("age", json!(42)), json!(42));
        assert_eq!(f("name", json!(null)), json!(null));
    }

    #[test]
    fn test_trim_whitespace_only_becomes_empty() {
        let f = trim();
        assert_eq!(f("name", json!("   ")), json!(""));
    }

    #[test]
    fn test_apply_to_fields() {
        let payload = json!({
            "college_name": "  College of Nursing ",
            "extra": 3
        });
        let filtered = apply_to_fields(payload, trim());
        assert_eq!(
            filtered,
            json!({ "college_name": "College of Nursing", "extra": 3 })
        );
    }

    #[test]
    fn test_apply_to_non_object() {
        assert_eq!(apply_to_fields(json!(" x "), trim()), json!(" x "));
    }
}
