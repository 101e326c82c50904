//! Field parsers - typed accessors over a generic JSON node
//!
//! The tracker's responses are schema-loose: optional keys are omitted or
//! null, numbers occasionally arrive as strings, and display fields are
//! expected to degrade to empty text rather than fail. These four parsers
//! encode that policy in one place so the entity constructors stay flat.

use serde_json::Value;
use thiserror::Error;

/// Errors raised when a response field cannot be converted to its typed form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A field the schema requires was missing or null
    #[error("missing required field '{0}'")]
    MissingField(String),

    /// A present field held a value of the wrong shape
    #[error("field '{key}' has invalid value: {value}")]
    InvalidValue {
        /// The offending key
        key: String,
        /// Rendering of the rejected value
        value: String,
    },
}

impl ParseError {
    pub(crate) fn invalid(key: &str, value: &Value) -> Self {
        ParseError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Extract a trimmed text value, collapsing missing and null to `""`.
///
/// Display fields (name, description, owner) are rendered directly, so the
/// absent/empty distinction is deliberately dropped here. Non-string scalars
/// are rendered through their JSON form rather than rejected.
pub fn parse_text(node: &Value, key: &str) -> String {
    match node.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

/// Extract an integer value, preserving the absent/present distinction.
///
/// Missing or null yields `Ok(None)`, never zero. A present value that is
/// neither a JSON integer nor a string of digits is a shape violation.
pub fn parse_int(node: &Value, key: &str) -> Result<Option<i64>, ParseError> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| ParseError::invalid(key, value)),
        Some(value @ Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ParseError::invalid(key, value)),
        Some(other) => Err(ParseError::invalid(key, other)),
    }
}

/// Extract a sequence value unchanged, or `None` if the key is absent.
pub fn parse_array<'a>(node: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    match node.get(key) {
        Some(Value::Array(values)) => Some(values),
        _ => None,
    }
}

/// Extract a boolean value, preserving the absent/present distinction.
///
/// Accepts native JSON booleans and the literal strings "true"/"false" in
/// any case. Anything else is rejected rather than coerced through
/// truthiness, which would read the string "false" as true.
pub fn parse_bool(node: &Value, key: &str) -> Result<Option<bool>, ParseError> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(value @ Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(ParseError::invalid(key, value)),
        },
        Some(other) => Err(ParseError::invalid(key, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_text_present() {
        let node = json!({"name": "  Fix login flow  "});
        assert_eq!(parse_text(&node, "name"), "Fix login flow");
    }

    #[test]
    fn test_parse_text_missing_and_null() {
        let node = json!({"description": null});
        assert_eq!(parse_text(&node, "description"), "");
        assert_eq!(parse_text(&node, "nope"), "");
    }

    #[test]
    fn test_parse_int_present() {
        let node = json!({"estimate": 3});
        assert_eq!(parse_int(&node, "estimate").unwrap(), Some(3));
    }

    #[test]
    fn test_parse_int_numeric_string() {
        let node = json!({"estimate": "5"});
        assert_eq!(parse_int(&node, "estimate").unwrap(), Some(5));
    }

    #[test]
    fn test_parse_int_missing_is_none_not_zero() {
        let node = json!({});
        assert_eq!(parse_int(&node, "estimate").unwrap(), None);
        let node = json!({"estimate": null});
        assert_eq!(parse_int(&node, "estimate").unwrap(), None);
    }

    #[test]
    fn test_parse_int_malformed() {
        let node = json!({"estimate": "abc"});
        assert!(matches!(
            parse_int(&node, "estimate"),
            Err(ParseError::InvalidValue { .. })
        ));

        let node = json!({"estimate": [1, 2]});
        assert!(parse_int(&node, "estimate").is_err());
    }

    #[test]
    fn test_parse_array() {
        let node = json!({"labels": ["a", "b"]});
        assert_eq!(parse_array(&node, "labels").unwrap().len(), 2);
        assert!(parse_array(&node, "missing").is_none());
    }

    #[test]
    fn test_parse_bool_native() {
        let node = json!({"complete": true});
        assert_eq!(parse_bool(&node, "complete").unwrap(), Some(true));
        let node = json!({"complete": false});
        assert_eq!(parse_bool(&node, "complete").unwrap(), Some(false));
    }

    #[test]
    fn test_parse_bool_string_forms() {
        let node = json!({"complete": "True"});
        assert_eq!(parse_bool(&node, "complete").unwrap(), Some(true));
        // "false" must not coerce to true through truthiness
        let node = json!({"complete": "false"});
        assert_eq!(parse_bool(&node, "complete").unwrap(), Some(false));
    }

    #[test]
    fn test_parse_bool_absent_and_invalid() {
        let node = json!({});
        assert_eq!(parse_bool(&node, "complete").unwrap(), None);
        let node = json!({"complete": "yes"});
        assert!(parse_bool(&node, "complete").is_err());
    }
}
