//! The index store abstraction.

use std::fmt::Debug;
use std::sync::Arc;

use crate::document::{DocId, Document};
use crate::error::Result;
use crate::query::Query;
use crate::schema::Schema;
use crate::search::{SearchRequest, SearchResults};
use crate::store::index::{IndexInfo, WriteResult};

/// A collection of named indices.
///
/// Every mutation is visible to readers as soon as the call returns;
/// `refresh` exists for callers that follow the write-then-refresh protocol
/// of a search cluster, and makes the writes durable on persistent stores.
pub trait IndexStore: Send + Sync + Debug {
    /// Create an index governed by `schema`.
    fn create_index(&self, name: &str, schema: Schema) -> Result<()>;

    /// Delete an index and every document in it.
    fn delete_index(&self, name: &str) -> Result<()>;

    /// Check if an index exists.
    fn index_exists(&self, name: &str) -> bool;

    /// Get the schema of an index.
    fn schema(&self, name: &str) -> Result<Arc<Schema>>;

    /// Index a document under `id`, overwriting any previous document with
    /// the same id.
    fn put_document(&self, name: &str, id: DocId, document: Document) -> Result<WriteResult>;

    /// Index a document under a freshly generated id.
    fn put_document_auto(&self, name: &str, document: Document) -> Result<WriteResult> {
        self.put_document(name, DocId::generate(), document)
    }

    /// Index a batch of documents.
    ///
    /// Documents are coerced and analyzed in parallel, at least `chunk_size`
    /// per task. The outer error is reserved for failures of the whole
    /// batch, such as a missing index. Otherwise there is one result per
    /// item, in input order, and every valid item becomes visible at once.
    fn put_batch(
        &self,
        name: &str,
        items: Vec<(DocId, Document)>,
        chunk_size: usize,
    ) -> Result<Vec<Result<WriteResult>>>;

    /// Get a stored document.
    fn get_document(&self, name: &str, id: &DocId) -> Result<Document>;

    /// Delete a document.
    fn delete_document(&self, name: &str, id: &DocId) -> Result<()>;

    /// Count the documents in an index.
    fn count(&self, name: &str) -> Result<usize>;

    /// Make prior writes to the index visible and durable.
    fn refresh(&self, name: &str) -> Result<()>;

    /// Describe every index, sorted by name.
    fn list_indices(&self) -> Vec<IndexInfo>;

    /// Execute a search request against an index.
    fn search(&self, name: &str, request: &SearchRequest) -> Result<SearchResults>;

    /// Every document matching `query`, in ascending id order.
    fn search_documents(&self, name: &str, query: &Query) -> Result<Vec<Document>> {
        let request = SearchRequest::new(query.clone()).unbounded();
        Ok(self.search(name, &request)?.into_documents())
    }

    /// Persist pending state. Stores without durable state do nothing.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
