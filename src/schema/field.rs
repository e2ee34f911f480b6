//! Field mappings for schema definition.

use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, AnalyzerKind, KeywordAnalyzer};
use crate::document::FieldValue;
use crate::error::{CinedexError, Result};

static KEYWORD: KeywordAnalyzer = KeywordAnalyzer;

/// How a single field is validated and matched.
///
/// Serialized in the mapping form a search cluster accepts:
/// `{"type": "text", "analyzer": "english"}`, `{"type": "integer"}`,
/// `{"type": "keyword"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldMapping {
    /// Analyzed full text.
    Text {
        #[serde(default)]
        analyzer: AnalyzerKind,
    },
    /// A 64-bit signed integer.
    Integer,
    /// An exact-match string.
    Keyword,
}

impl FieldMapping {
    /// A text field using `analyzer`.
    pub fn text(analyzer: AnalyzerKind) -> Self {
        FieldMapping::Text { analyzer }
    }

    /// Get the name of this field type.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldMapping::Text { .. } => "text",
            FieldMapping::Integer => "integer",
            FieldMapping::Keyword => "keyword",
        }
    }

    /// The analyzer applied to values of this field.
    ///
    /// Keyword and integer fields use the keyword analyzer, so their values
    /// are compared whole.
    pub fn analyzer(&self) -> &'static dyn Analyzer {
        match self {
            FieldMapping::Text { analyzer } => analyzer.analyzer(),
            FieldMapping::Integer | FieldMapping::Keyword => &KEYWORD,
        }
    }

    /// Coerce `value` to this field's type.
    ///
    /// Integer fields accept integers, integral floats and numeric text.
    /// Text and keyword fields stringify numbers and booleans. Null passes
    /// through unchanged.
    pub fn coerce(&self, field: &str, value: &FieldValue) -> Result<FieldValue> {
        match (self, value) {
            (_, FieldValue::Null) => Ok(FieldValue::Null),
            (FieldMapping::Integer, FieldValue::Integer(i)) => Ok(FieldValue::Integer(*i)),
            (FieldMapping::Integer, FieldValue::Float(f))
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
            {
                Ok(FieldValue::Integer(*f as i64))
            }
            (FieldMapping::Integer, FieldValue::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| {
                    CinedexError::schema(format!(
                        "field '{field}' expects an integer, got '{s}'"
                    ))
                }),
            (FieldMapping::Integer, other) => Err(CinedexError::schema(format!(
                "field '{field}' expects an integer, got {} {other}",
                other.type_name()
            ))),
            (FieldMapping::Text { .. } | FieldMapping::Keyword, FieldValue::Text(s)) => {
                Ok(FieldValue::Text(s.clone()))
            }
            (FieldMapping::Text { .. } | FieldMapping::Keyword, other) => {
                Ok(FieldValue::Text(other.to_string()))
            }
        }
    }
}
