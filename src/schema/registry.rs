//! Registry of per-index schemas.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::document::Document;
use crate::error::{CinedexError, Result};
use crate::schema::Schema;

/// Maps index names to the schema documents in that index must follow.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `schema` for `index`.
    ///
    /// Fails with `IndexAlreadyExists` if the name already has a schema.
    pub fn register<S: Into<String>>(&self, index: S, schema: Schema) -> Result<Arc<Schema>> {
        let index = index.into();
        schema.validate()?;

        let mut guard = self.schemas.write();
        if guard.contains_key(&index) {
            return Err(CinedexError::index_exists(index));
        }
        let schema = Arc::new(schema);
        guard.insert(index, Arc::clone(&schema));
        Ok(schema)
    }

    /// Remove the schema for `index`, returning it if present.
    pub fn unregister(&self, index: &str) -> Option<Arc<Schema>> {
        self.schemas.write().remove(index)
    }

    pub fn get(&self, index: &str) -> Option<Arc<Schema>> {
        self.schemas.read().get(index).cloned()
    }

    /// Check a document against the schema registered for `index`.
    ///
    /// Returns `false` when no schema is registered.
    pub fn validate(&self, index: &str, document: &Document) -> bool {
        self.get(index)
            .map(|schema| schema.conforms(document))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}
