//! Durable key-value substrate shared by the plant cache and search history
//!
//! Every store writes whole values under a single key; there are no partial
//! or append writes and no locking across read-modify-write cycles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::error::{LeafError, LeafResult};

pub const PLANT_CACHE_KEY: &str = "@leaflens/plant_cache";
pub const SEARCH_HISTORY_KEY: &str = "@leaflens/search_history";

/// Asynchronous text key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; a missing key is `Ok(None)`
    async fn get(&self, key: &str) -> LeafResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> LeafResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> LeafResult<()>;
}

/// One file per key inside a data directory (~/.leaflens by default)
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Map a storage key onto a file name: `@leaflens/plant_cache` -> `leaflens_plant_cache.json`
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name: String = key
            .trim_start_matches('@')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if name.is_empty() {
            name.push('_');
        }
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> LeafResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LeafError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> LeafResult<()> {
        // Create data directory if it doesn't exist
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            LeafError::Storage(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.path_for(key);
        tokio::fs::write(&path, value).await.map_err(|e| {
            LeafError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    async fn remove(&self, key: &str) -> LeafResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LeafError::Storage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// In-process store for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> LeafResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> LeafResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> LeafResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
