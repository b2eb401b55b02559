//! In-Memory Cache Module
//!
//! `CacheStore` implementation backed by a HashMap with per-entry TTL.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheEntry;
use crate::error::CacheUnavailable;
use crate::store::CacheStore;

// == Memory Cache ==
/// Process-local cache with TTL expiry.
///
/// Expired entries are dropped lazily when observed by `lookup` and in bulk
/// by `sweep_expired`, which the background cleanup task drives. All
/// critical sections are short and never held across an await point.
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty MemoryCache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Lookup ==
    /// Looks up a key, dropping the entry if it has expired.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut entries = self.entries_mut();

        if let Some(entry) = entries.get(key) {
            if entry.is_expired() {
                entries.remove(key);
                return None;
            }
            return Some(entry.value.clone());
        }

        None
    }

    // == Insert ==
    /// Inserts or overwrites an entry, resetting its expiry to now + `ttl`.
    pub fn insert(&self, key: &str, value: &str, ttl: Duration) {
        self.entries_mut()
            .insert(key.to_string(), CacheEntry::new(value.to_string(), ttl));
    }

    // == Remove ==
    /// Removes an entry; removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        self.entries_mut().remove(key);
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let mut entries = self.entries_mut();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        // A poisoned lock only means a panic mid-read; the map is still consistent
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn entries_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// == CacheStore Implementation ==
/// The in-memory cache itself never fails; the fallible trait surface
/// exists for networked implementations.
#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheUnavailable> {
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheUnavailable> {
        self.insert(key, value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheUnavailable> {
        self.remove(key);
        Ok(())
    }
}
