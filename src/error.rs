//! Error types for the cinedex library.
//!
//! All fallible operations return [`CinedexError`] through the crate-wide
//! [`Result`] alias. Index and document lookups have dedicated variants so
//! callers can react to them without matching on message text.
//!
//! # Examples
//!
//! ```
//! use cinedex::error::{CinedexError, ErrorKind, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CinedexError::index_not_found("movies"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => assert_eq!(e.kind(), ErrorKind::IndexNotFound),
//! }
//! ```

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for cinedex operations.
#[derive(Error, Debug)]
pub enum CinedexError {
    /// The dataset could not be read or is malformed.
    #[error("Data source error: {0}")]
    DataSource(String),

    /// An index with this name already exists.
    #[error("Index already exists: {0}")]
    IndexAlreadyExists(String),

    /// No index with this name exists.
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// No document with this id exists in the index.
    #[error("Document not found: {id} in index {index}")]
    DocumentNotFound { index: String, id: String },

    /// A document or mapping does not conform to the schema.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The query is malformed or references unknown fields.
    #[error("Query error: {0}")]
    Query(String),

    /// Startup configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied argument is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors (snapshot files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with CinedexError.
pub type Result<T> = std::result::Result<T, CinedexError>;

/// Coarse classification of an error, used to tag failed bulk items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[serde(rename = "data_source_error")]
    DataSource,
    IndexAlreadyExists,
    IndexNotFound,
    DocumentNotFound,
    SchemaViolation,
    #[serde(rename = "query_error")]
    Query,
    #[serde(rename = "config_error")]
    Config,
    InvalidArgument,
    #[serde(rename = "io_error")]
    Io,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::DataSource => "data_source_error",
            ErrorKind::IndexAlreadyExists => "index_already_exists",
            ErrorKind::IndexNotFound => "index_not_found",
            ErrorKind::DocumentNotFound => "document_not_found",
            ErrorKind::SchemaViolation => "schema_violation",
            ErrorKind::Query => "query_error",
            ErrorKind::Config => "config_error",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Io => "io_error",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

impl CinedexError {
    /// Create a new data source error.
    pub fn data_source<S: Into<String>>(msg: S) -> Self {
        CinedexError::DataSource(msg.into())
    }

    /// Create a new index-already-exists error.
    pub fn index_exists<S: Into<String>>(name: S) -> Self {
        CinedexError::IndexAlreadyExists(name.into())
    }

    /// Create a new index-not-found error.
    pub fn index_not_found<S: Into<String>>(name: S) -> Self {
        CinedexError::IndexNotFound(name.into())
    }

    /// Create a new document-not-found error.
    pub fn document_not_found<S: Into<String>, T: Into<String>>(index: S, id: T) -> Self {
        CinedexError::DocumentNotFound {
            index: index.into(),
            id: id.into(),
        }
    }

    /// Create a new schema violation error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        CinedexError::SchemaViolation(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        CinedexError::Query(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CinedexError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CinedexError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CinedexError::Other(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CinedexError::DataSource(_) => ErrorKind::DataSource,
            CinedexError::IndexAlreadyExists(_) => ErrorKind::IndexAlreadyExists,
            CinedexError::IndexNotFound(_) => ErrorKind::IndexNotFound,
            CinedexError::DocumentNotFound { .. } => ErrorKind::DocumentNotFound,
            CinedexError::SchemaViolation(_) => ErrorKind::SchemaViolation,
            CinedexError::Query(_) => ErrorKind::Query,
            CinedexError::Config(_) => ErrorKind::Config,
            CinedexError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CinedexError::Io(_) => ErrorKind::Io,
            CinedexError::Json(_) | CinedexError::Other(_) | CinedexError::Anyhow(_) => {
                ErrorKind::Other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = CinedexError::index_not_found("movies");
        assert_eq!(error.to_string(), "Index not found: movies");

        let error = CinedexError::schema("field 'year' expects an integer");
        assert_eq!(
            error.to_string(),
            "Schema violation: field 'year' expects an integer"
        );

        let error = CinedexError::document_not_found("movies", "12");
        assert_eq!(error.to_string(), "Document not found: 12 in index movies");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = CinedexError::from(io_error);

        match error {
            CinedexError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(
            CinedexError::schema("x").kind().to_string(),
            "schema_violation"
        );
        assert_eq!(
            CinedexError::index_exists("movies").kind(),
            ErrorKind::IndexAlreadyExists
        );
        assert_eq!(CinedexError::other("x").kind(), ErrorKind::Other);

        for kind in [ErrorKind::Query, ErrorKind::DataSource, ErrorKind::IndexNotFound] {
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.to_string())
            );
        }
    }
}
