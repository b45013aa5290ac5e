//! Plant detail cache keyed by scientific name
//!
//! The whole cache lives in one serialized blob. Every write reads the
//! blob, replaces one key and rewrites it, so two overlapping writers can
//! lose one update (last write wins). Expired entries are never deleted
//! here; callers decide freshness at read time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::LeafResult;
use crate::models::PlantDetails;
use crate::now_millis;
use crate::storage::{KeyValueStore, PLANT_CACHE_KEY};

/// Cached record plus the epoch-millisecond time it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: PlantDetails,
    pub timestamp: i64,
}

impl CacheEntry {
    /// Valid while `now - timestamp < ttl`
    pub fn is_fresh(&self, now: i64, ttl: Duration) -> bool {
        now.saturating_sub(self.timestamp) < ttl.as_millis() as i64
    }
}

type CacheMap = BTreeMap<String, CacheEntry>;

/// Entry counts for `leaflens cache stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub fresh: usize,
    pub expired: usize,
}

#[derive(Clone)]
pub struct PlantCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl PlantCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn read_all(&self) -> LeafResult<CacheMap> {
        match self.store.get(PLANT_CACHE_KEY).await? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(CacheMap::new()),
        }
    }

    async fn write_all(&self, cache: &CacheMap) -> LeafResult<()> {
        let blob = serde_json::to_string(cache)?;
        self.store.set(PLANT_CACHE_KEY, &blob).await
    }

    /// Stored entry for `key`, fresh or not
    pub async fn get(&self, key: &str) -> LeafResult<Option<CacheEntry>> {
        Ok(self.read_all().await?.remove(key))
    }

    /// Stored record for `key` when it is still inside the TTL window
    pub async fn get_fresh(&self, key: &str, now: i64) -> LeafResult<Option<PlantDetails>> {
        match self.get(key).await? {
            Some(entry) if entry.is_fresh(now, self.ttl) => Ok(Some(entry.data)),
            Some(entry) => {
                debug!(key = %key, written_at = entry.timestamp, "Cache entry expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Write `details` under `key`, stamped with the current time
    pub async fn put(&self, key: &str, details: &PlantDetails) -> LeafResult<()> {
        self.put_at(key, details, now_millis()).await
    }

    /// Write `details` under `key` with an explicit timestamp
    pub async fn put_at(&self, key: &str, details: &PlantDetails, timestamp: i64) -> LeafResult<()> {
        let mut cache = self.read_all().await?;
        cache.insert(
            key.to_string(),
            CacheEntry {
                data: details.clone(),
                timestamp,
            },
        );
        self.write_all(&cache).await
    }

    /// Drop one key; returns whether it was present
    pub async fn remove(&self, key: &str) -> LeafResult<bool> {
        let mut cache = self.read_all().await?;
        let existed = cache.remove(key).is_some();
        if existed {
            self.write_all(&cache).await?;
        }
        Ok(existed)
    }

    /// Delete the whole cache blob
    pub async fn clear(&self) -> LeafResult<()> {
        self.store.remove(PLANT_CACHE_KEY).await
    }

    pub async fn stats(&self, now: i64) -> LeafResult<CacheStats> {
        let cache = self.read_all().await?;
        let fresh = cache
            .values()
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .count();
        Ok(CacheStats {
            total: cache.len(),
            fresh,
            expired: cache.len() - fresh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn cache() -> (PlantCache, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (PlantCache::new(store.clone(), DAY), store)
    }

    #[test]
    fn test_entry_freshness_boundary() {
        let entry = CacheEntry {
            data: PlantDetails::new("Rosa"),
            timestamp: 1_000,
        };
        let ttl_ms = DAY.as_millis() as i64;
        assert!(entry.is_fresh(1_000, DAY));
        assert!(entry.is_fresh(1_000 + ttl_ms - 1, DAY));
        assert!(!entry.is_fresh(1_000 + ttl_ms, DAY));
    }

    #[tokio::test]
    async fn test_put_then_get_fresh() {
        let (cache, _) = cache();
        let details = PlantDetails::placeholder("Aloe vera");
        cache.put_at("Aloe vera", &details, 5_000).await.unwrap();

        let hit = cache.get_fresh("Aloe vera", 6_000).await.unwrap();
        assert_eq!(hit, Some(details));
        assert_eq!(cache.get_fresh("Rosa", 6_000).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_kept_but_not_served() {
        let (cache, _) = cache();
        cache
            .put_at("Aloe vera", &PlantDetails::new("Aloe vera"), 0)
            .await
            .unwrap();

        let later = DAY.as_millis() as i64 + 1;
        assert_eq!(cache.get_fresh("Aloe vera", later).await.unwrap(), None);
        assert!(cache.get("Aloe vera").await.unwrap().is_some());

        let stats = cache.stats(later).await.unwrap();
        assert_eq!(stats, CacheStats { total: 1, fresh: 0, expired: 1 });
    }

    #[tokio::test]
    async fn test_put_rewrites_whole_blob() {
        let (cache, store) = cache();
        cache.put_at("a", &PlantDetails::new("a"), 1).await.unwrap();
        cache.put_at("b", &PlantDetails::new("b"), 2).await.unwrap();

        let blob = store.get(PLANT_CACHE_KEY).await.unwrap().unwrap();
        let map: CacheMap = serde_json::from_str(&blob).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["b"].timestamp, 2);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (cache, store) = cache();
        cache.put_at("a", &PlantDetails::new("a"), 1).await.unwrap();
        cache.put_at("b", &PlantDetails::new("b"), 1).await.unwrap();

        assert!(cache.remove("a").await.unwrap());
        assert!(!cache.remove("a").await.unwrap());
        assert_eq!(cache.stats(1).await.unwrap().total, 1);

        cache.clear().await.unwrap();
        assert_eq!(store.get(PLANT_CACHE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error() {
        let (cache, store) = cache();
        store.set(PLANT_CACHE_KEY, "not json").await.unwrap();
        assert!(cache.get("a").await.is_err());
    }
}
