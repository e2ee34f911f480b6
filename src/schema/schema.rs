//! Schema management for document structure definition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerKind;
use crate::document::{Document, FieldValue};
use crate::error::{CinedexError, Result};
use crate::schema::field::FieldMapping;

/// A schema defines the fields documents in an index may carry.
///
/// The JSON form matches the mapping body a search cluster accepts:
///
/// ```
/// use cinedex::schema::Schema;
///
/// let schema = Schema::from_json(
///     r#"{"properties": {"title": {"type": "text", "analyzer": "english"},
///                        "year": {"type": "integer"}}}"#,
/// ).unwrap();
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Map of field names to their mappings
    properties: BTreeMap<String, FieldMapping>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Schema {
            properties: BTreeMap::new(),
        }
    }

    /// The movie dataset mapping.
    pub fn movies() -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("title".to_string(), FieldMapping::text(AnalyzerKind::English));
        properties.insert(
            "ethnicity".to_string(),
            FieldMapping::text(AnalyzerKind::Standard),
        );
        properties.insert(
            "director".to_string(),
            FieldMapping::text(AnalyzerKind::Standard),
        );
        properties.insert("cast".to_string(), FieldMapping::text(AnalyzerKind::Standard));
        properties.insert("genre".to_string(), FieldMapping::text(AnalyzerKind::Standard));
        properties.insert("plot".to_string(), FieldMapping::text(AnalyzerKind::English));
        properties.insert("year".to_string(), FieldMapping::Integer);
        properties.insert("wiki_page".to_string(), FieldMapping::Keyword);
        Schema { properties }
    }

    /// Parse a schema from its JSON mapping form.
    pub fn from_json(input: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(input)
            .map_err(|e| CinedexError::schema(format!("invalid mapping: {e}")))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Add a field to the schema.
    pub fn add_field<S: Into<String>>(&mut self, name: S, mapping: FieldMapping) -> Result<()> {
        let name = name.into();

        if self.properties.contains_key(&name) {
            return Err(CinedexError::schema(format!(
                "Field '{name}' already exists"
            )));
        }
        if name.is_empty() {
            return Err(CinedexError::schema("Field name cannot be empty"));
        }

        self.properties.insert(name, mapping);
        Ok(())
    }

    /// Get a field mapping by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldMapping> {
        self.properties.get(name)
    }

    /// Check if a field exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Get all field names, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        self.properties.keys().map(|s| s.as_str()).collect()
    }

    /// Get all field mappings.
    pub fn fields(&self) -> &BTreeMap<String, FieldMapping> {
        &self.properties
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Validate the schema itself.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(CinedexError::schema("Schema must have at least one field"));
        }
        if self.properties.keys().any(|name| name.is_empty()) {
            return Err(CinedexError::schema("Field name cannot be empty"));
        }
        Ok(())
    }

    /// Check a document against the schema and return its normalised form.
    ///
    /// Every field the document carries must be declared and coerce to the
    /// declared type. Null values are dropped. Declared fields may be absent.
    pub fn coerce(&self, document: &Document) -> Result<Document> {
        let mut normalised = Document::new();
        for (name, value) in document.fields() {
            let mapping = self.properties.get(name).ok_or_else(|| {
                CinedexError::schema(format!("field '{name}' is not defined in the mapping"))
            })?;
            match mapping.coerce(name, value)? {
                FieldValue::Null => {}
                coerced => normalised.add_field(name.clone(), coerced),
            }
        }
        Ok(normalised)
    }

    /// Check whether a document conforms to the schema.
    pub fn conforms(&self, document: &Document) -> bool {
        self.coerce(document).is_ok()
    }

    /// Create a builder for constructing schemas.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }
}

/// A builder for constructing schemas in a fluent manner.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        SchemaBuilder {
            schema: Schema::new(),
        }
    }

    /// Add a field to the schema being built.
    pub fn add_field<S: Into<String>>(mut self, name: S, mapping: FieldMapping) -> Result<Self> {
        self.schema.add_field(name, mapping)?;
        Ok(self)
    }

    /// Add a text field using `analyzer`.
    pub fn add_text<S: Into<String>>(self, name: S, analyzer: AnalyzerKind) -> Result<Self> {
        self.add_field(name, FieldMapping::text(analyzer))
    }

    /// Add an integer field.
    pub fn add_integer<S: Into<String>>(self, name: S) -> Result<Self> {
        self.add_field(name, FieldMapping::Integer)
    }

    /// Add a keyword field.
    pub fn add_keyword<S: Into<String>>(self, name: S) -> Result<Self> {
        self.add_field(name, FieldMapping::Keyword)
    }

    /// Build the final schema.
    pub fn build(self) -> Result<Schema> {
        self.schema.validate()?;
        Ok(self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_schema_round_trip() {
        let schema = Schema::movies();
        assert_eq!(schema.len(), 8);

        let json = serde_json::to_string(&schema).unwrap();
        let parsed = Schema::from_json(&json).unwrap();
        assert_eq!(parsed, schema);
        assert_eq!(
            parsed.get_field("wiki_page"),
            Some(&FieldMapping::Keyword)
        );
    }

    #[test]
    fn test_schema_builder() {
        let schema = Schema::builder()
            .add_text("title", AnalyzerKind::English)
            .unwrap()
            .add_integer("year")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(schema.field_names(), vec!["title", "year"]);

        assert!(Schema::builder().build().is_err());
        assert!(
            Schema::builder()
                .add_integer("year")
                .unwrap()
                .add_keyword("year")
                .is_err()
        );
    }

    #[test]
    fn test_empty_mapping_is_rejected() {
        assert!(Schema::from_json(r#"{"properties": {}}"#).is_err());
        assert!(Schema::from_json(r#"{"props": {}}"#).is_err());
    }

    #[test]
    fn test_coerce_document() {
        let schema = Schema::movies();
        let doc = Document::builder()
            .add_text("title", "The Godfather")
            .add_text("year", "1972")
            .add_field("genre", FieldValue::Null)
            .build();

        let normalised = schema.coerce(&doc).unwrap();
        assert_eq!(normalised.get_field("year"), Some(&FieldValue::Integer(1972)));
        assert!(!normalised.has_field("genre"));
    }

    #[test]
    fn test_document_validation() {
        let schema = Schema::movies();

        let unknown = Document::builder().add_text("rating", "R").build();
        assert!(!schema.conforms(&unknown));

        let bad_year = Document::builder().add_text("year", "unknown").build();
        match schema.coerce(&bad_year) {
            Err(CinedexError::SchemaViolation(msg)) => assert!(msg.contains("year")),
            other => panic!("expected schema violation, got {other:?}"),
        }

        assert!(schema.conforms(&Document::new()));
    }
}
