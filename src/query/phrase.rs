//! Match-phrase query implementation.

use crate::error::{CinedexError, Result};
use crate::document::FieldValue;
use crate::query::matcher::{EmptyMatcher, ExactValueMatcher, Matcher, TokenPhraseMatcher};
use crate::schema::{FieldMapping, Schema};

/// A query that matches documents whose field contains a phrase.
///
/// On text fields the phrase and the stored value go through the field's
/// analyzer, and the phrase tokens must appear contiguously and in order.
/// Keyword fields compare the whole value; integer fields compare numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseQuery {
    /// The field to search in.
    field: String,
    /// The literal phrase.
    phrase: String,
}

impl PhraseQuery {
    /// Create a new phrase query.
    pub fn new<S: Into<String>, T: Into<String>>(field: S, phrase: T) -> Self {
        PhraseQuery {
            field: field.into(),
            phrase: phrase.into(),
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Bind this query to `schema`.
    pub fn matcher(&self, schema: &Schema) -> Result<Box<dyn Matcher>> {
        let mapping = schema.get_field(&self.field).ok_or_else(|| {
            CinedexError::query(format!("no such field '{}' in the mapping", self.field))
        })?;

        match mapping {
            FieldMapping::Text { .. } => {
                let tokens = mapping.analyzer().analyze(&self.phrase);
                if tokens.is_empty() {
                    return Ok(Box::new(EmptyMatcher));
                }
                Ok(Box::new(TokenPhraseMatcher::new(&self.field, tokens)))
            }
            FieldMapping::Keyword => {
                if self.phrase.is_empty() {
                    return Ok(Box::new(EmptyMatcher));
                }
                Ok(Box::new(ExactValueMatcher::new(
                    &self.field,
                    FieldValue::Text(self.phrase.clone()),
                )))
            }
            FieldMapping::Integer => {
                let value = self.phrase.trim().parse::<i64>().map_err(|_| {
                    CinedexError::query(format!(
                        "field '{}' is an integer but the phrase '{}' is not",
                        self.field, self.phrase
                    ))
                })?;
                Ok(Box::new(ExactValueMatcher::new(
                    &self.field,
                    FieldValue::Integer(value),
                )))
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "match_phrase": { &self.field: &self.phrase } })
    }
}
