//! Documents paired with their analyzed token streams.

use std::collections::BTreeMap;

use crate::document::{Document, FieldValue};
use crate::schema::{FieldMapping, Schema};

/// A schema-normalised document together with the tokens of its text fields.
///
/// Text fields are analyzed once at indexing time so that queries only
/// analyze their own phrases.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedDocument {
    document: Document,
    tokens: BTreeMap<String, Vec<String>>,
}

impl AnalyzedDocument {
    /// Analyze every text field of `document` with the analyzer its mapping
    /// names. The document should already be normalised by the schema.
    pub fn new(document: Document, schema: &Schema) -> Self {
        let mut tokens = BTreeMap::new();
        for (name, value) in document.fields() {
            if let (Some(mapping @ FieldMapping::Text { .. }), FieldValue::Text(text)) =
                (schema.get_field(name), value)
            {
                tokens.insert(name.clone(), mapping.analyzer().analyze(text));
            }
        }
        AnalyzedDocument { document, tokens }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The analyzed tokens of a text field.
    pub fn tokens(&self, field: &str) -> Option<&[String]> {
        self.tokens.get(field).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fields_are_analyzed() {
        let schema = Schema::movies();
        let doc = Document::builder()
            .add_text("title", "The Godfather Part II")
            .add_text("cast", "Al Pacino, Robert Duvall")
            .add_text("wiki_page", "https://en.wikipedia.org/wiki/The_Godfather_Part_II")
            .add_integer("year", 1974)
            .build();

        let analyzed = AnalyzedDocument::new(doc, &schema);
        assert_eq!(
            analyzed.tokens("title").unwrap(),
            &["godfather", "part", "ii"]
        );
        assert_eq!(
            analyzed.tokens("cast").unwrap(),
            &["al", "pacino", "robert", "duvall"]
        );
        assert!(analyzed.tokens("wiki_page").is_none());
        assert!(analyzed.tokens("year").is_none());
    }
}
