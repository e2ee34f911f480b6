//! Field value types for documents.
//!
//! [`FieldValue`] serializes untagged, so a document's JSON form is the plain
//! object a user would write by hand:
//!
//! ```
//! use cinedex::document::FieldValue;
//!
//! let year: FieldValue = serde_json::from_str("1972").unwrap();
//! assert_eq!(year, FieldValue::Integer(1972));
//!
//! let title: FieldValue = serde_json::from_str("\"Chinatown\"").unwrap();
//! assert_eq!(title.as_text(), Some("Chinatown"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a value for a field in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl FieldValue {
    /// Convert to text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer value, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Name of the value's type, used in schema violation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 42, 2.5, "text"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Boolean(true),
                FieldValue::Integer(42),
                FieldValue::Float(2.5),
                FieldValue::Text("text".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_values_are_rejected() {
        assert!(serde_json::from_str::<FieldValue>(r#"{"lat": 1.0}"#).is_err());
        assert!(serde_json::from_str::<FieldValue>("[1, 2]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Integer(1972).to_string(), "1972");
        assert_eq!(FieldValue::from("Chinatown").to_string(), "Chinatown");
    }
}
