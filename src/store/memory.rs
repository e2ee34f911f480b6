//! In-memory index store.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::document::{AnalyzedDocument, DocId, Document};
use crate::error::{CinedexError, Result};
use crate::schema::{Schema, SchemaRegistry};
use crate::search::{SearchRequest, SearchResults};
use crate::store::index::{Index, IndexInfo, IndexSnapshot, WriteResult};
use crate::store::traits::IndexStore;
use crate::store::validate_index_name;

/// An index store that keeps everything in memory.
///
/// The index map has its own lock and every index has another, so writers to
/// one index never block readers of a different one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    indices: RwLock<HashMap<String, Arc<RwLock<Index>>>>,
    schemas: SchemaRegistry,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self, name: &str) -> Result<Arc<RwLock<Index>>> {
        self.indices
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| CinedexError::index_not_found(name))
    }

    /// Remove an index and its schema, handing the index back to the caller.
    pub(crate) fn detach_index(&self, name: &str) -> Result<Arc<RwLock<Index>>> {
        let mut indices = self.indices.write();
        let index = indices
            .remove(name)
            .ok_or_else(|| CinedexError::index_not_found(name))?;
        self.schemas.unregister(name);
        Ok(index)
    }

    /// Put back an index taken out by [`MemoryStore::detach_index`].
    pub(crate) fn reattach_index(&self, name: &str, index: Arc<RwLock<Index>>) -> Result<()> {
        let mut indices = self.indices.write();
        if indices.contains_key(name) {
            return Err(CinedexError::index_exists(name));
        }
        let schema = Schema::clone(index.read().schema());
        self.schemas.register(name, schema)?;
        indices.insert(name.to_string(), index);
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> Vec<IndexSnapshot> {
        let indices: Vec<Arc<RwLock<Index>>> = self.indices.read().values().cloned().collect();
        let mut snapshots: Vec<IndexSnapshot> =
            indices.iter().map(|index| index.read().snapshot()).collect();
        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        snapshots
    }

    pub(crate) fn from_snapshots(snapshots: Vec<IndexSnapshot>) -> Result<Self> {
        let store = MemoryStore::new();
        {
            let mut indices = store.indices.write();
            for snapshot in snapshots {
                let name = snapshot.name.clone();
                let schema = store.schemas.register(name.clone(), snapshot.schema.clone())?;
                indices.insert(name, Arc::new(RwLock::new(Index::restore(snapshot, schema))));
            }
        }
        Ok(store)
    }
}

impl IndexStore for MemoryStore {
    fn create_index(&self, name: &str, schema: Schema) -> Result<()> {
        validate_index_name(name)?;

        let mut indices = self.indices.write();
        if indices.contains_key(name) {
            return Err(CinedexError::index_exists(name));
        }
        let schema = self.schemas.register(name, schema)?;
        indices.insert(
            name.to_string(),
            Arc::new(RwLock::new(Index::new(name.to_string(), schema))),
        );

        info!("Created index {name}");
        Ok(())
    }

    fn delete_index(&self, name: &str) -> Result<()> {
        self.detach_index(name)?;
        info!("Deleted index {name}");
        Ok(())
    }

    fn index_exists(&self, name: &str) -> bool {
        self.indices.read().contains_key(name)
    }

    fn schema(&self, name: &str) -> Result<Arc<Schema>> {
        self.schemas
            .get(name)
            .ok_or_else(|| CinedexError::index_not_found(name))
    }

    fn put_document(&self, name: &str, id: DocId, document: Document) -> Result<WriteResult> {
        let index = self.index(name)?;
        let schema = Arc::clone(index.read().schema());
        let normalised = schema.coerce(&document)?;
        let analyzed = AnalyzedDocument::new(normalised, &schema);

        let result = index.write().put(id, analyzed);
        debug!(
            "Indexed document {} in {name} ({:?}, version {})",
            result.id, result.result, result.version
        );
        Ok(result)
    }

    fn put_batch(
        &self,
        name: &str,
        items: Vec<(DocId, Document)>,
        chunk_size: usize,
    ) -> Result<Vec<Result<WriteResult>>> {
        let index = self.index(name)?;
        let schema = Arc::clone(index.read().schema());

        let prepared: Vec<(DocId, Result<AnalyzedDocument>)> = items
            .into_par_iter()
            .with_min_len(chunk_size.max(1))
            .map(|(id, document)| {
                let analyzed = schema
                    .coerce(&document)
                    .map(|normalised| AnalyzedDocument::new(normalised, &schema));
                (id, analyzed)
            })
            .collect();

        let mut guard = index.write();
        let results = prepared
            .into_iter()
            .map(|(id, analyzed)| analyzed.map(|doc| guard.put(id, doc)))
            .collect::<Vec<_>>();
        drop(guard);

        debug!(
            "Applied batch of {} documents to {name} ({} failed)",
            results.len(),
            results.iter().filter(|r| r.is_err()).count()
        );
        Ok(results)
    }

    fn get_document(&self, name: &str, id: &DocId) -> Result<Document> {
        self.index(name)?
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| CinedexError::document_not_found(name, id.as_str()))
    }

    fn delete_document(&self, name: &str, id: &DocId) -> Result<()> {
        let index = self.index(name)?;
        if index.write().remove(id).is_none() {
            return Err(CinedexError::document_not_found(name, id.as_str()));
        }
        debug!("Deleted document {id} from {name}");
        Ok(())
    }

    fn count(&self, name: &str) -> Result<usize> {
        Ok(self.index(name)?.read().len())
    }

    fn refresh(&self, name: &str) -> Result<()> {
        self.index(name).map(|_| ())
    }

    fn list_indices(&self) -> Vec<IndexInfo> {
        let indices: Vec<Arc<RwLock<Index>>> = self.indices.read().values().cloned().collect();
        let mut infos: Vec<IndexInfo> = indices.iter().map(|index| index.read().info()).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    fn search(&self, name: &str, request: &SearchRequest) -> Result<SearchResults> {
        let index = self.index(name)?;
        let guard = index.read();
        let results = guard.searcher().search(request)?;
        debug!(
            "Search on {name} matched {} documents in {} ms",
            results.total, results.took_ms
        );
        Ok(results)
    }
}
