//! File-backed index store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::document::{DocId, Document};
use crate::error::{CinedexError, Result};
use crate::schema::Schema;
use crate::search::{SearchRequest, SearchResults};
use crate::store::index::{IndexInfo, IndexSnapshot, WriteResult};
use crate::store::memory::MemoryStore;
use crate::store::traits::IndexStore;

/// Name of the snapshot file inside the store directory.
pub const SNAPSHOT_FILE: &str = "cinedex.json";

const SNAPSHOT_FORMAT: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreSnapshot {
    format: u32,
    indices: Vec<IndexSnapshot>,
}

/// An index store that serves from memory and persists to a JSON snapshot.
///
/// Index creation and deletion are written through immediately. Document
/// writes are persisted by `refresh`, `flush`, or when the store is dropped.
#[derive(Debug)]
pub struct FileStore {
    directory: PathBuf,
    inner: MemoryStore,
    dirty: AtomicBool,
    // Serializes snapshot writers so temp files never collide.
    persist_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store in `directory`, creating the directory if needed and
    /// loading an existing snapshot.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;

        let path = directory.join(SNAPSHOT_FILE);
        let inner = if path.exists() {
            let bytes = fs::read(&path)?;
            let snapshot: StoreSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
                CinedexError::data_source(format!(
                    "corrupt snapshot {}: {e}",
                    path.display()
                ))
            })?;
            if snapshot.format != SNAPSHOT_FORMAT {
                return Err(CinedexError::data_source(format!(
                    "unsupported snapshot format {} in {}",
                    snapshot.format,
                    path.display()
                )));
            }
            info!(
                "Loaded {} indices from {}",
                snapshot.indices.len(),
                path.display()
            );
            MemoryStore::from_snapshots(snapshot.indices)?
        } else {
            MemoryStore::new()
        };

        Ok(FileStore {
            directory,
            inner,
            dirty: AtomicBool::new(false),
            persist_lock: Mutex::new(()),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.directory.join(SNAPSHOT_FILE)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Write the snapshot to a temporary file and rename it into place.
    fn persist(&self) -> Result<()> {
        let _guard = self.persist_lock.lock();
        self.dirty.store(false, Ordering::Release);

        let snapshot = StoreSnapshot {
            format: SNAPSHOT_FORMAT,
            indices: self.inner.snapshot(),
        };
        let path = self.snapshot_path();
        let temp_path = self.directory.join(format!("{SNAPSHOT_FILE}.tmp"));

        let result = write_atomically(&snapshot, &temp_path, &path);

        if result.is_err() {
            self.mark_dirty();
            let _ = fs::remove_file(&temp_path);
        } else {
            debug!("Persisted snapshot to {}", path.display());
        }
        result
    }
}

fn write_atomically(snapshot: &StoreSnapshot, temp_path: &Path, path: &Path) -> Result<()> {
    let mut file = fs::File::create(temp_path)?;
    serde_json::to_writer(&mut file, snapshot)?;
    file.flush()?;
    file.sync_all()?;
    fs::rename(temp_path, path)?;
    Ok(())
}

impl IndexStore for FileStore {
    fn create_index(&self, name: &str, schema: Schema) -> Result<()> {
        self.inner.create_index(name, schema)?;
        if let Err(e) = self.persist() {
            warn!("Rolling back creation of {name}: {e}");
            self.inner.delete_index(name)?;
            return Err(e);
        }
        Ok(())
    }

    fn delete_index(&self, name: &str) -> Result<()> {
        let index = self.inner.detach_index(name)?;
        if let Err(e) = self.persist() {
            warn!("Restoring index {name} after failed deletion: {e}");
            self.inner.reattach_index(name, index)?;
            return Err(e);
        }
        info!("Deleted index {name}");
        Ok(())
    }

    fn index_exists(&self, name: &str) -> bool {
        self.inner.index_exists(name)
    }

    fn schema(&self, name: &str) -> Result<Arc<Schema>> {
        self.inner.schema(name)
    }

    fn put_document(&self, name: &str, id: DocId, document: Document) -> Result<WriteResult> {
        let result = self.inner.put_document(name, id, document)?;
        self.mark_dirty();
        Ok(result)
    }

    fn put_batch(
        &self,
        name: &str,
        items: Vec<(DocId, Document)>,
        chunk_size: usize,
    ) -> Result<Vec<Result<WriteResult>>> {
        let results = self.inner.put_batch(name, items, chunk_size)?;
        if results.iter().any(|r| r.is_ok()) {
            self.mark_dirty();
        }
        Ok(results)
    }

    fn get_document(&self, name: &str, id: &DocId) -> Result<Document> {
        self.inner.get_document(name, id)
    }

    fn delete_document(&self, name: &str, id: &DocId) -> Result<()> {
        self.inner.delete_document(name, id)?;
        self.mark_dirty();
        Ok(())
    }

    fn count(&self, name: &str) -> Result<usize> {
        self.inner.count(name)
    }

    fn refresh(&self, name: &str) -> Result<()> {
        self.inner.refresh(name)?;
        self.flush()
    }

    fn list_indices(&self) -> Vec<IndexInfo> {
        self.inner.list_indices()
    }

    fn search(&self, name: &str, request: &SearchRequest) -> Result<SearchResults> {
        self.inner.search(name, request)
    }

    fn flush(&self) -> Result<()> {
        if self.dirty.load(Ordering::Acquire) {
            self.persist()?;
        }
        Ok(())
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(
                "Failed to persist snapshot to {}: {e}",
                self.snapshot_path().display()
            );
        }
    }
}
