//! Simulated Backing Store
//!
//! Stands in for a real database: artificial latency on every call and
//! timestamp-derived values for ids that were never written.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::current_timestamp_ms;
use crate::error::BackingStoreError;
use crate::store::BackingStore;

// == Simulated Backing Store ==
/// In-process stand-in for a slow source-of-truth store.
///
/// Reads are read-your-writes: once `write` records a value for an id,
/// subsequent fetches return it. An id that was never written fetches a
/// fresh `value-from-db-<timestamp>` value, so repeated uncached reads of
/// such an id produce different values.
#[derive(Debug)]
pub struct SimulatedBackingStore {
    /// Values recorded by `write`, keyed by record id
    records: RwLock<HashMap<String, String>>,
    /// Artificial latency applied to every fetch and write
    latency: Duration,
}

impl SimulatedBackingStore {
    // == Constructor ==
    /// Creates a store that sleeps `latency` on every fetch and write.
    pub fn new(latency: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            latency,
        }
    }
}

#[async_trait]
impl BackingStore for SimulatedBackingStore {
    async fn fetch(&self, id: &str) -> Result<String, BackingStoreError> {
        tokio::time::sleep(self.latency).await;

        if let Some(value) = self.records.read().await.get(id) {
            return Ok(value.clone());
        }

        Ok(format!("value-from-db-{}", current_timestamp_ms()))
    }

    async fn write(&self, id: &str, value: &str) -> Result<(), BackingStoreError> {
        tokio::time::sleep(self.latency).await;

        self.records
            .write()
            .await
            .insert(id.to_string(), value.to_string());

        Ok(())
    }
}
