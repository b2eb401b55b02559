//! Cache-Aside Store
//!
//! Read path: cache first, backing store on miss, repopulate with a TTL.
//! Write path: backing store first, then invalidate the cached entry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::BackingStoreError;
use crate::models::{DataResponse, Source};
use crate::store::{cache_key, BackingStore, CacheStore, StatsSnapshot, StoreStats};

// == Cache Aside Store ==
/// Coordinates reads and writes between a cache and a backing store.
///
/// The cache is an accelerator, never a correctness dependency: a failed
/// cache lookup degrades to a miss and a failed invalidation is logged,
/// while backing-store failures always propagate to the caller.
///
/// Both collaborators are injected at construction; the store owns neither
/// lifecycle and holds no locks across calls, so any number of reads and
/// writes can run concurrently.
pub struct CacheAsideStore {
    cache: Arc<dyn CacheStore>,
    backing: Arc<dyn BackingStore>,
    /// Expiry applied to every entry populated on a miss
    cache_ttl: Duration,
    stats: StoreStats,
}

impl CacheAsideStore {
    // == Constructor ==
    /// Creates a store over the given collaborators.
    ///
    /// # Arguments
    /// * `cache` - Cache consulted before the backing store
    /// * `backing` - Source-of-truth store
    /// * `cache_ttl` - Expiry for entries populated on a miss
    pub fn new(
        cache: Arc<dyn CacheStore>,
        backing: Arc<dyn BackingStore>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            backing,
            cache_ttl,
            stats: StoreStats::new(),
        }
    }

    // == Get ==
    /// Retrieves the value for `id`, cache first.
    ///
    /// On a hit the backing store is not called and the response is tagged
    /// `Source::Cache`. On a miss the value is fetched from the backing
    /// store, the cache is populated under `"data:" + id` with the
    /// configured TTL, and the response is tagged `Source::Store`.
    ///
    /// A miss in flight concurrently with an `update` can re-populate the
    /// cache with the pre-update value after the invalidation has run.
    /// Staleness is bounded by the TTL, nothing stronger; callers that need
    /// the committed value must read the backing store directly.
    ///
    /// Dropping the returned future before the fetch resolves leaves the
    /// cache unmodified, as does a failed fetch.
    pub async fn get(&self, id: &str) -> std::result::Result<DataResponse, BackingStoreError> {
        let key = cache_key(id);

        match self.cache.get(&key).await {
            Ok(Some(value)) => {
                self.stats.record_hit();
                debug!(id, "cache hit");
                return Ok(DataResponse::new(id, value, Source::Cache));
            }
            Ok(None) => {}
            Err(err) => {
                // An unreachable cache degrades to a miss
                warn!(id, error = %err, "cache lookup failed, falling through to backing store");
            }
        }

        self.stats.record_miss();
        debug!(id, "cache miss, fetching from backing store");
        let value = self.backing.fetch(id).await?;

        if let Err(err) = self.cache.set(&key, &value, self.cache_ttl).await {
            warn!(id, error = %err, "failed to populate cache after fetch");
        }

        Ok(DataResponse::new(id, value, Source::Store))
    }

    // == Update ==
    /// Writes `value` for `id` to the backing store, then deletes the
    /// cached entry.
    ///
    /// The write commits before the invalidation runs, so this call never
    /// re-caches the old value itself. If the write fails the invalidation
    /// is skipped and the error propagates; whatever was cached stays and
    /// expires with its TTL. If the invalidation fails the update still
    /// reports success, since a missed delete only risks a stale read
    /// until expiry, not data loss.
    pub async fn update(
        &self,
        id: &str,
        value: &str,
    ) -> std::result::Result<(), BackingStoreError> {
        self.backing.write(id, value).await?;
        self.stats.record_invalidation();
        debug!(id, "backing store updated, invalidating cache entry");

        if let Err(err) = self.cache.delete(&cache_key(id)).await {
            warn!(id, error = %err, "cache invalidation failed after write");
        }

        Ok(())
    }

    // == Stats ==
    /// Returns a snapshot of the hit/miss/invalidation counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
