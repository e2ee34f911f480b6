//! Searcher implementation for executing queries against an index.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;

use crate::document::{AnalyzedDocument, DocId};
use crate::error::Result;
use crate::query::{Matcher, Query};
use crate::schema::Schema;
use crate::search::{SearchHit, SearchRequest, SearchResults};

/// Below this many documents a scan stays on the calling thread.
const PARALLEL_THRESHOLD: usize = 1024;

/// A searcher that evaluates queries against one index's documents.
#[derive(Debug)]
pub struct Searcher<'a> {
    schema: &'a Schema,
    documents: &'a BTreeMap<DocId, AnalyzedDocument>,
}

impl<'a> Searcher<'a> {
    pub fn new(schema: &'a Schema, documents: &'a BTreeMap<DocId, AnalyzedDocument>) -> Self {
        Searcher { schema, documents }
    }

    /// Execute a search request.
    ///
    /// Hits come back in ascending id order. Unknown fields in the query fail
    /// the whole search before any document is examined.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let start = Instant::now();
        let matcher = request.query.matcher(self.schema)?;
        let matching = self.collect(matcher.as_ref());

        let total = matching.len();
        let hits = matching
            .into_iter()
            .skip(request.from)
            .take(request.size)
            .map(|(id, doc)| SearchHit {
                id: id.clone(),
                score: 1.0,
                source: doc.document().clone(),
            })
            .collect();

        Ok(SearchResults {
            total,
            hits,
            took_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Count the documents matching `query`.
    pub fn count(&self, query: &Query) -> Result<usize> {
        let matcher = query.matcher(self.schema)?;
        Ok(self.collect(matcher.as_ref()).len())
    }

    fn collect(&self, matcher: &dyn Matcher) -> Vec<(&'a DocId, &'a AnalyzedDocument)> {
        if self.documents.len() >= PARALLEL_THRESHOLD {
            // Collecting a rayon iterator into a Vec keeps the map's order.
            self.documents
                .par_iter()
                .filter(|(_, doc)| matcher.matches(doc))
                .collect()
        } else {
            self.documents
                .iter()
                .filter(|(_, doc)| matcher.matches(doc))
                .collect()
        }
    }
}
