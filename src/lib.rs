//! # cinedex
//!
//! A self-contained document index and match-phrase query engine for movie
//! metadata.
//!
//! ## Features
//!
//! - CSV dataset loading with deterministic, seeded sampling
//! - Field mappings with `standard`, `english` and `keyword` analysis
//! - In-memory and file-backed index stores
//! - Batched bulk indexing with per-item outcomes
//! - Boolean queries over match-phrase clauses
//!
//! ```
//! use cinedex::prelude::*;
//!
//! let store = MemoryStore::new();
//! store.create_index("movies", Schema::movies()).unwrap();
//! store
//!     .put_document(
//!         "movies",
//!         DocId::from(0u64),
//!         Document::builder()
//!             .add_text("cast", "Jack Nicholson, Faye Dunaway")
//!             .add_text("director", "Roman Polanski")
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let query = QueryParser::new()
//!     .parse_json(r#"{"match_phrase": {"cast": "jack nicholson"}}"#)
//!     .unwrap();
//! assert_eq!(store.search_documents("movies", &query).unwrap().len(), 1);
//! ```

pub mod analysis;
pub mod bulk;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod document;
pub mod error;
pub mod query;
pub mod schema;
pub mod search;
pub mod store;

pub mod prelude {
    pub use crate::bulk::{BulkItem, BulkItemOutcome, BulkLoader, BulkResponse};
    pub use crate::dataset::{DatasetLoader, MovieRecord};
    pub use crate::document::{DocId, Document, FieldValue};
    pub use crate::error::{CinedexError, ErrorKind, Result};
    pub use crate::query::{Query, QueryParser};
    pub use crate::schema::{FieldMapping, Schema};
    pub use crate::search::{SearchRequest, SearchResults};
    pub use crate::store::{FileStore, IndexStore, MemoryStore, open_store};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
