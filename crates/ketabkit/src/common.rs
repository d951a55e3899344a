//! Shaping of catalog API payloads
//!
//! The catalog pads its records with `0`, `false`, `""` and `null` for
//! "no value". These are dropped before records are deserialized, so a
//! missing optional field and a blank one look the same to callers.
//! Legitimate zeros and `false` flags are dropped as well; typed records
//! default them back.

use serde_json::{Map, Value};

/// Whether a JSON value counts as "no value"
///
/// Empty arrays and objects are not falsy themselves; they are only
/// pruned from their parent object after cleaning.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Recursively remove falsy values from an object or array
pub fn remove_falsy_values(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(clean_array(items)),
        Value::Object(map) => Value::Object(clean_object(map)),
        other => other,
    }
}

fn clean_array(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .map(remove_falsy_values)
        .filter(|item| !is_falsy(item))
        .collect()
}

fn clean_object(map: Map<String, Value>) -> Map<String, Value> {
    let mut cleaned = Map::new();

    for (key, value) in map {
        if is_falsy(&value) {
            continue;
        }

        match value {
            Value::Array(items) => {
                let items = clean_array(items);
                if !items.is_empty() {
                    cleaned.insert(key, Value::Array(items));
                }
            }
            Value::Object(inner) => {
                let inner = clean_object(inner);
                if !inner.is_empty() {
                    cleaned.insert(key, Value::Object(inner));
                }
            }
            other => {
                cleaned.insert(key, other);
            }
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_removes_falsy_fields() {
        let cleaned = remove_falsy_values(json!({
            "id": 7,
            "name": "Author",
            "resume": "",
            "deleted_at": null,
            "is_followed": false,
            "books_count": 0
        }));
        assert_eq!(cleaned, json!({ "id": 7, "name": "Author" }));
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let cleaned = remove_falsy_values(json!({
            "files": { "data": { "size": 10, "url": "" }, "pdf": { "size": 0 } },
            "authors": [{ "id": 1, "name": "" }, null, 0],
            "links": [],
            "meta": [{ "name": "" }]
        }));
        assert_eq!(
            cleaned,
            json!({
                "files": { "data": { "size": 10 } },
                "authors": [{ "id": 1 }],
                "meta": [{}]
            })
        );
    }

    #[test]
    fn test_top_level_array() {
        let cleaned = remove_falsy_values(json!([{ "id": 1, "x": "" }, null, false, "kept"]));
        assert_eq!(cleaned, json!([{ "id": 1 }, "kept"]));
    }

    #[test]
    fn test_scalars_untouched() {
        assert_eq!(remove_falsy_values(json!(0)), json!(0));
        assert_eq!(remove_falsy_values(json!("text")), json!("text"));
    }

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy(&json!(0.0)));
        assert!(is_falsy(&json!("")));
        assert!(!is_falsy(&json!("0")));
        assert!(!is_falsy(&json!([])));
        assert!(!is_falsy(&json!(-1)));
    }
}
