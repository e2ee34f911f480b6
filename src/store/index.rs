//! A single named index: schema, documents and per-document versions.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{AnalyzedDocument, DocId, Document};
use crate::schema::Schema;
use crate::search::Searcher;

/// Whether a write created a new document or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Created,
    Updated,
}

/// Result of indexing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub id: DocId,
    pub result: WriteOutcome,
    /// Starts at 1 and grows by one on every overwrite of the same id.
    pub version: u64,
}

impl WriteResult {
    pub fn is_created(&self) -> bool {
        self.result == WriteOutcome::Created
    }
}

/// Summary of an index, as reported by `list_indices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    pub docs_count: usize,
    pub fields_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub(crate) struct Index {
    name: String,
    schema: Arc<Schema>,
    created_at: DateTime<Utc>,
    documents: BTreeMap<DocId, AnalyzedDocument>,
    versions: HashMap<DocId, u64>,
}

impl Index {
    pub(crate) fn new(name: String, schema: Arc<Schema>) -> Self {
        Index {
            name,
            schema,
            created_at: Utc::now(),
            documents: BTreeMap::new(),
            versions: HashMap::new(),
        }
    }

    pub(crate) fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Insert or overwrite a document that has already been checked against
    /// this index's schema.
    pub(crate) fn put(&mut self, id: DocId, document: AnalyzedDocument) -> WriteResult {
        let version = self.versions.entry(id.clone()).or_insert(0);
        *version += 1;
        let version = *version;

        let result = match self.documents.insert(id.clone(), document) {
            Some(_) => WriteOutcome::Updated,
            None => WriteOutcome::Created,
        };
        WriteResult {
            id,
            result,
            version,
        }
    }

    pub(crate) fn get(&self, id: &DocId) -> Option<&Document> {
        self.documents.get(id).map(AnalyzedDocument::document)
    }

    pub(crate) fn remove(&mut self, id: &DocId) -> Option<AnalyzedDocument> {
        let removed = self.documents.remove(id);
        if removed.is_some() {
            self.versions.remove(id);
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }

    pub(crate) fn searcher(&self) -> Searcher<'_> {
        Searcher::new(&self.schema, &self.documents)
    }

    pub(crate) fn info(&self) -> IndexInfo {
        IndexInfo {
            name: self.name.clone(),
            docs_count: self.documents.len(),
            fields_count: self.schema.len(),
            created_at: self.created_at,
        }
    }

    pub(crate) fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            name: self.name.clone(),
            schema: self.schema.as_ref().clone(),
            created_at: self.created_at,
            documents: self
                .documents
                .iter()
                .map(|(id, doc)| {
                    let version = self.versions.get(id).copied().unwrap_or(1);
                    (
                        id.clone(),
                        StoredDocument {
                            version,
                            source: doc.document().clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Rebuild an index from a snapshot, re-analyzing every document.
    pub(crate) fn restore(snapshot: IndexSnapshot, schema: Arc<Schema>) -> Self {
        let mut documents = BTreeMap::new();
        let mut versions = HashMap::new();
        for (id, stored) in snapshot.documents {
            versions.insert(id.clone(), stored.version);
            documents.insert(id, AnalyzedDocument::new(stored.source, &schema));
        }
        Index {
            name: snapshot.name,
            schema,
            created_at: snapshot.created_at,
            documents,
            versions,
        }
    }
}

/// Serialized form of an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct IndexSnapshot {
    pub(crate) name: String,
    pub(crate) schema: Schema,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) documents: BTreeMap<DocId, StoredDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredDocument {
    version: u64,
    #[serde(rename = "_source")]
    source: Document,
}
