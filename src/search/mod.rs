//! Search requests, results and execution over an index's documents.

pub mod searcher;

pub use self::searcher::Searcher;

use serde::{Deserialize, Serialize};

use crate::document::{DocId, Document};
use crate::query::Query;

/// Default number of hits returned by a search.
pub const DEFAULT_SIZE: usize = 10;

/// Search request containing a query and paging.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// The query to execute.
    pub query: Query,
    /// Number of matching documents to skip.
    pub from: usize,
    /// Maximum number of hits to return.
    pub size: usize,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(query: Query) -> Self {
        SearchRequest {
            query,
            from: 0,
            size: DEFAULT_SIZE,
        }
    }

    /// Set the paging offset.
    pub fn from(mut self, from: usize) -> Self {
        self.from = from;
        self
    }

    /// Set the maximum number of hits to return.
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Return every matching document.
    pub fn unbounded(mut self) -> Self {
        self.from = 0;
        self.size = usize::MAX;
        self
    }
}

impl From<Query> for SearchRequest {
    fn from(query: Query) -> Self {
        SearchRequest::new(query)
    }
}

/// A search hit containing a document and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The document ID.
    pub id: DocId,
    /// The relevance score. Matching is boolean, so every hit scores 1.0.
    pub score: f32,
    /// The stored document.
    pub source: Document,
}

/// Search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total number of matching documents, before paging.
    pub total: usize,
    /// The requested page of hits, in ascending id order.
    pub hits: Vec<SearchHit>,
    /// Time spent evaluating the query.
    pub took_ms: u64,
}

impl SearchResults {
    /// Consume the results, keeping only the documents.
    pub fn into_documents(self) -> Vec<Document> {
        self.hits.into_iter().map(|hit| hit.source).collect()
    }
}
