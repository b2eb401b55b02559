//! Response DTOs for the data service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::store::StatsSnapshot;

// == Source ==
/// Provenance of a value returned by the read operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Source {
    /// Served from the cache without touching the backing store
    Cache,
    /// Fetched from the backing store on a cache miss
    Store,
}

// == Data Response ==
/// Response body for the read operation (GET /data)
///
/// Constructed fresh per call; `source` exposes whether the cache or the
/// backing store produced the value, for observability and tests.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    /// The requested record id
    pub id: String,
    /// The value for the record
    pub value: String,
    /// Where the value came from
    pub source: Source,
}

impl DataResponse {
    /// Creates a new DataResponse
    pub fn new(id: impl Into<String>, value: impl Into<String>, source: Source) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            source,
        }
    }
}

// == Update Response ==
/// Response body for the update operation (POST /data)
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    /// Success message
    pub message: String,
    /// The record id that was updated
    pub id: String,
}

impl UpdateResponse {
    /// Creates a new UpdateResponse
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Record '{}' updated successfully", id),
            id,
        }
    }
}

// == Stats Response ==
/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that fell through to the backing store
    pub misses: u64,
    /// Cache invalidations performed after writes
    pub invalidations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a store snapshot
    pub fn new(snapshot: StatsSnapshot) -> Self {
        Self {
            hits: snapshot.hits,
            misses: snapshot.misses,
            invalidations: snapshot.invalidations,
            hit_rate: snapshot.hit_rate(),
        }
    }
}

// == Health Response ==
/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Error Response ==
/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
