//! Index stores.
//!
//! An [`IndexStore`] owns named indices of documents. [`MemoryStore`] keeps
//! them in memory; [`FileStore`] does the same and snapshots them to disk.
//! [`open_store`] picks one from a cluster address.

pub mod file;
pub mod index;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use index::{IndexInfo, WriteOutcome, WriteResult};
pub use memory::MemoryStore;
pub use traits::IndexStore;

use std::sync::Arc;

use log::info;

use crate::error::{CinedexError, Result};

const MEMORY_SCHEME: &str = "memory://";
const FILE_SCHEME: &str = "file://";

/// Characters an index name may not contain.
const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\\', '*', '?', '"', '<', '>', '|', ',', '#', ' '];

/// Build a store from a cluster address.
///
/// `memory://` gives a [`MemoryStore`] and `file://<dir>` a [`FileStore`]
/// rooted at `<dir>`. Any other address is a configuration error.
///
/// ```
/// use cinedex::store::open_store;
///
/// let store = open_store("memory://").unwrap();
/// assert!(store.list_indices().is_empty());
/// assert!(open_store("http://localhost:9200").is_err());
/// ```
pub fn open_store(address: &str) -> Result<Arc<dyn IndexStore>> {
    let address = address.trim();
    if address.starts_with(MEMORY_SCHEME) {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    if let Some(directory) = address.strip_prefix(FILE_SCHEME) {
        if directory.is_empty() {
            return Err(CinedexError::config(
                "file:// address needs a directory, e.g. file:///var/lib/cinedex",
            ));
        }
        info!("Using file store in {directory}");
        return Ok(Arc::new(FileStore::open(directory)?));
    }
    Err(CinedexError::config(format!(
        "unsupported cluster address '{address}' (expected memory:// or file://<dir>)"
    )))
}

/// Check that `name` is usable as an index name.
pub fn validate_index_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CinedexError::invalid_argument("index name cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(CinedexError::invalid_argument(format!(
            "index name cannot be '{name}'"
        )));
    }
    if name.starts_with(['_', '-', '+']) {
        return Err(CinedexError::invalid_argument(format!(
            "index name '{name}' cannot start with '_', '-' or '+'"
        )));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(CinedexError::invalid_argument(format!(
            "index name '{name}' must be lowercase"
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(CinedexError::invalid_argument(format!(
            "index name '{name}' contains forbidden character '{c}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_index_name() {
        assert!(validate_index_name("movies").is_ok());
        assert!(validate_index_name("movies-2024.v1").is_ok());
        assert!(validate_index_name("Movies").is_err());
        assert!(validate_index_name("a,b").is_err());
        assert!(validate_index_name("+movies").is_err());
    }

    #[test]
    fn test_open_store_schemes() {
        assert!(open_store("memory://").is_ok());
        assert!(matches!(
            open_store("file://"),
            Err(CinedexError::Config(_))
        ));
        assert!(matches!(
            open_store("https://search.example.com:9200"),
            Err(CinedexError::Config(_))
        ));

        let dir = tempfile::TempDir::new().unwrap();
        let address = format!("file://{}", dir.path().display());
        let store = open_store(&address).unwrap();
        store
            .create_index("movies", crate::schema::Schema::movies())
            .unwrap();
        assert!(dir.path().join(file::SNAPSHOT_FILE).exists());
    }
}
