//! Collaborator Traits
//!
//! Narrow interfaces for the two external dependencies of the cache-aside
//! protocol. Concrete implementations live in the `cache` and `backing`
//! modules; test doubles implement these directly.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BackingStoreError, CacheUnavailable};

// == Cache Store ==
/// Key-value cache with per-entry advisory TTL.
///
/// Implementations must treat keys independently and be safe for concurrent
/// use. Absence of a key is not an error; a `CacheUnavailable` means the
/// cache transport itself failed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Looks up a key. Returns `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheUnavailable>;

    /// Stores a value under a key, replacing any previous entry and
    /// resetting its expiry to now + `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheUnavailable>;

    /// Removes a key. Deleting an absent key succeeds as a no-op.
    async fn delete(&self, key: &str) -> Result<(), CacheUnavailable>;
}

// == Backing Store ==
/// Source-of-truth store for records.
///
/// Calls may block for realistic I/O latency and must not be assumed
/// instantaneous.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Fetches the current value for a record id.
    async fn fetch(&self, id: &str) -> Result<String, BackingStoreError>;

    /// Persists a new value for a record id.
    async fn write(&self, id: &str, value: &str) -> Result<(), BackingStoreError>;
}
