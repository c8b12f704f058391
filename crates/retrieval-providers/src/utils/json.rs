//! JSON Value Extension
//!
//! Convenience accessors and the canonical string form used to serialize
//! object-valued payload fields for cross-backend scroll/query results.

use std::collections::HashMap;

/// Extension trait for `serde_json::Value` with convenient accessor methods.
pub trait JsonExt {
    /// Get a string value or a default
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str;

    /// Get an optional string value
    fn opt_str(&self, key: &str) -> Option<&str>;
}

impl JsonExt for serde_json::Value {
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(|v| v.as_str()).unwrap_or(default)
    }

    fn opt_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }
}

impl JsonExt for HashMap<String, serde_json::Value> {
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(|v| v.as_str()).unwrap_or(default)
    }

    fn opt_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }
}

/// Canonicalize a payload field value for cross-backend scroll results:
/// scalars pass through as their natural string form, objects and arrays
/// serialize to compact JSON text.
pub fn canonical_field_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_pass_through() {
        assert_eq!(canonical_field_string(&json!("rust")), "rust");
        assert_eq!(canonical_field_string(&json!(42)), "42");
        assert_eq!(canonical_field_string(&json!(true)), "true");
    }

    #[test]
    fn objects_serialize_to_compact_json() {
        let value = json!({"a": 1, "b": "two"});
        assert_eq!(canonical_field_string(&value), r#"{"a":1,"b":"two"}"#);
    }
}
