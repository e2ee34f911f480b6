//! JSONL document reader.
//!
//! Each non-empty line is a single JSON object. An optional `_id` key names
//! the document id; it is removed from the document body:
//! ```jsonl
//! {"_id": 1, "title": "Chinatown", "year": 1974}
//! {"title": "The Shining", "year": 1980}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::document::{DocId, Document};
use crate::error::{CinedexError, Result};

/// Reads `(id, document)` pairs from a JSONL file.
#[derive(Debug, Clone, Default)]
pub struct JsonlDocumentReader;

impl JsonlDocumentReader {
    pub fn new() -> Self {
        JsonlDocumentReader
    }

    /// Open `path` and iterate over its documents.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<JsonlDocumentIterator> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CinedexError::data_source(format!("cannot open {}: {e}", path.display()))
        })?;
        Ok(JsonlDocumentIterator {
            reader: BufReader::new(file),
            line_number: 0,
        })
    }

    /// Parse one line into an optional id and a document.
    pub fn parse_line(line: &str) -> Result<(Option<DocId>, Document)> {
        let value: serde_json::Value = serde_json::from_str(line)?;
        let serde_json::Value::Object(mut map) = value else {
            return Err(CinedexError::invalid_argument(
                "each JSONL line must be a JSON object",
            ));
        };

        let id = match map.remove("_id") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(DocId::from(s)),
            Some(serde_json::Value::Number(n)) => Some(DocId::from(n.to_string())),
            Some(other) => {
                return Err(CinedexError::invalid_argument(format!(
                    "_id must be a string or number, got {other}"
                )));
            }
        };

        let doc = Document::from_json_value(serde_json::Value::Object(map))?;
        Ok((id, doc))
    }
}

/// Iterator over JSONL documents.
pub struct JsonlDocumentIterator {
    reader: BufReader<File>,
    line_number: usize,
}

impl Iterator for JsonlDocumentIterator {
    type Item = Result<(Option<DocId>, Document)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            self.line_number += 1;
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let line_number = self.line_number;
                    return Some(JsonlDocumentReader::parse_line(trimmed).map_err(|e| {
                        CinedexError::data_source(format!("line {line_number}: {e}"))
                    }));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
