//! Field-level change summaries for audit entries

use serde_json::{Map, Value};

/// Fields that change on every write and carry no meaning in a summary
const IGNORED_FIELDS: [&str; 1] = ["updated_at"];

/// Summarize top-level field changes between two record states
///
/// Returns `None` when nothing meaningful changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(b), Value::Object(a)) => object_changes(b, a),
        _ if before != after => vec![format!("{} -> {}", render(before), render(after))],
        _ => Vec::new(),
    };

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn object_changes(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<&String> = before.keys().chain(after.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .filter(|key| !IGNORED_FIELDS.contains(&key.as_str()))
        .filter_map(|key| match (before.get(key), after.get(key)) {
            (Some(b), Some(a)) if b != a => Some(format!("{}: {} -> {}", key, render(b), render(a))),
            (Some(b), None) => Some(format!("{}: {} -> (removed)", key, render(b))),
            (None, Some(a)) => Some(format!("{}: (added) -> {}", key, render(a))),
            _ => None,
        })
        .collect()
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"card_name": "HDFC", "amount": 150000, "is_checked": false});
        let after = json!({"card_name": "HDFC", "amount": 150000, "is_checked": true});

        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("is_checked: false -> true")
        );
    }

    #[test]
    fn test_added_and_removed_fields_sorted() {
        let before = json!({"description": "Fuel", "month": "Jan 2025"});
        let after = json!({"month": "Jan 2025", "expression": "900"});

        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("description: \"Fuel\" -> (removed), expression: (added) -> \"900\"")
        );
    }

    #[test]
    fn test_timestamp_churn_ignored() {
        let before = json!({"amount": 1, "updated_at": null});
        let after = json!({"amount": 1, "updated_at": "2025-01-01T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_lists_and_long_text() {
        let before = json!({"categories": ["Food"], "note": "x".repeat(60)});
        let after = json!({"categories": ["Food", "Rent"], "note": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("categories: [1 items] -> [2 items]"));
        assert!(diff.contains("...\" -> \"short\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).as_deref(), Some("1 -> 2"));
        assert!(generate_diff(&json!(null), &json!(null)).is_none());
    }
}
