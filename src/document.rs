//! Document module.
//!
//! Documents are flat collections of field-value pairs. Inside an index each
//! document is addressed by a [`DocId`]; the schema decides how every field is
//! validated and matched.
//!
//! # Examples
//!
//! ```
//! use cinedex::document::Document;
//!
//! let doc = Document::builder()
//!     .add_text("title", "The Godfather")
//!     .add_integer("year", 1972)
//!     .build();
//!
//! assert_eq!(doc.len(), 2);
//! assert!(doc.has_field("title"));
//! ```

pub mod analyzed;
#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;
pub mod id;
pub mod jsonl;

pub use analyzed::AnalyzedDocument;
pub use document::{Document, DocumentBuilder};
pub use field_value::FieldValue;
pub use id::DocId;
pub use jsonl::JsonlDocumentReader;
