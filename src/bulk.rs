//! Bulk indexing with per-item outcomes.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::document::{DocId, Document};
use crate::error::{CinedexError, ErrorKind, Result};
use crate::store::{IndexStore, WriteOutcome, WriteResult};

/// Default number of documents prepared per parallel chunk.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// One document to index, with an explicit id or none.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItem {
    pub id: Option<DocId>,
    pub document: Document,
}

impl BulkItem {
    pub fn new<I: Into<DocId>>(id: I, document: Document) -> Self {
        BulkItem {
            id: Some(id.into()),
            document,
        }
    }

    /// An item whose id is generated when it is indexed.
    pub fn auto(document: Document) -> Self {
        BulkItem { id: None, document }
    }
}

impl From<(DocId, Document)> for BulkItem {
    fn from((id, document): (DocId, Document)) -> Self {
        BulkItem::new(id, document)
    }
}

/// Outcome of one bulk item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BulkItemOutcome {
    Ok {
        id: DocId,
        result: WriteOutcome,
        version: u64,
    },
    Err {
        id: DocId,
        kind: ErrorKind,
        reason: String,
    },
}

impl BulkItemOutcome {
    fn failed(id: DocId, error: &CinedexError) -> Self {
        BulkItemOutcome::Err {
            id,
            kind: error.kind(),
            reason: error.to_string(),
        }
    }

    pub fn id(&self) -> &DocId {
        match self {
            BulkItemOutcome::Ok { id, .. } | BulkItemOutcome::Err { id, .. } => id,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, BulkItemOutcome::Ok { .. })
    }
}

impl From<WriteResult> for BulkItemOutcome {
    fn from(result: WriteResult) -> Self {
        BulkItemOutcome::Ok {
            id: result.id,
            result: result.result,
            version: result.version,
        }
    }
}

/// Response to a bulk request: one outcome per item, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResponse {
    pub took_ms: u64,
    /// True if any item failed.
    pub errors: bool,
    pub items: Vec<BulkItemOutcome>,
}

impl BulkResponse {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// The failed items.
    pub fn failures(&self) -> impl Iterator<Item = &BulkItemOutcome> {
        self.items.iter().filter(|item| !item.is_ok())
    }
}

/// Sends bulk requests to an [`IndexStore`].
///
/// Every item is attempted; a bad document fails only itself. The loader
/// does not refresh the index afterwards.
#[derive(Debug, Clone)]
pub struct BulkLoader {
    store: Arc<dyn IndexStore>,
    batch_size: usize,
}

impl BulkLoader {
    pub fn new(store: Arc<dyn IndexStore>) -> Self {
        BulkLoader {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the number of documents prepared per parallel chunk.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(CinedexError::invalid_argument(
                "batch size must be greater than zero",
            ));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Index `items` into `index` as one request.
    ///
    /// Documents are coerced and analyzed in parallel chunks of the batch
    /// size; the store applies the whole request at once, so readers see
    /// either none of it or all of its valid items.
    pub fn bulk_put<I>(&self, index: &str, items: I) -> BulkResponse
    where
        I: IntoIterator<Item = BulkItem>,
    {
        let start = Instant::now();
        let batch: Vec<(DocId, Document)> = items
            .into_iter()
            .map(|item| (item.id.unwrap_or_else(DocId::generate), item.document))
            .collect();
        let ids: Vec<DocId> = batch.iter().map(|(id, _)| id.clone()).collect();
        debug!(
            "Sending {} documents to {index} in chunks of {}",
            ids.len(),
            self.batch_size
        );

        let outcomes = match self.store.put_batch(index, batch, self.batch_size) {
            Ok(results) => ids
                .into_iter()
                .zip(results)
                .map(|(id, result)| match result {
                    Ok(written) => written.into(),
                    Err(e) => BulkItemOutcome::failed(id, &e),
                })
                .collect(),
            Err(e) => ids
                .into_iter()
                .map(|id| BulkItemOutcome::failed(id, &e))
                .collect(),
        };

        finish(index, outcomes, start)
    }

    /// Index `items` one request at a time.
    pub fn put_each<I>(&self, index: &str, items: I) -> BulkResponse
    where
        I: IntoIterator<Item = BulkItem>,
    {
        let start = Instant::now();
        let outcomes = items
            .into_iter()
            .map(|item| {
                let id = item.id.unwrap_or_else(DocId::generate);
                match self.store.put_document(index, id.clone(), item.document) {
                    Ok(result) => result.into(),
                    Err(e) => BulkItemOutcome::failed(id, &e),
                }
            })
            .collect();

        finish(index, outcomes, start)
    }
}

fn finish(index: &str, items: Vec<BulkItemOutcome>, start: Instant) -> BulkResponse {
    let response = BulkResponse {
        took_ms: start.elapsed().as_millis() as u64,
        errors: items.iter().any(|item| !item.is_ok()),
        items,
    };

    if response.errors {
        warn!(
            "Indexed {} documents into {index}, {} failed",
            response.succeeded(),
            response.failed()
        );
    } else {
        info!(
            "Indexed {} documents into {index} in {} ms",
            response.items.len(),
            response.took_ms
        );
    }
    response
}
