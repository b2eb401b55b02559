//! API Handlers
//!
//! HTTP request handlers for each data service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::{Result, ServiceError};
use crate::models::{
    DataResponse, GetDataParams, HealthResponse, StatsResponse, UpdateRequest, UpdateResponse,
};
use crate::store::CacheAsideStore;

// == App State ==
/// Application state shared across all handlers.
///
/// Holds the cache-aside store behind an Arc; the store takes `&self` on
/// every operation, so concurrent requests never contend on the state.
#[derive(Clone)]
pub struct AppState {
    /// The cache-aside store serving all requests
    pub store: Arc<CacheAsideStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    ///
    /// The store arrives fully wired; collaborator construction and
    /// lifecycle belong to the caller.
    pub fn new(store: CacheAsideStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Handler for GET /data?id=<id>
///
/// Reads a record cache-first; the response reports whether the cache or
/// the backing store produced the value.
pub async fn get_data_handler(
    State(state): State<AppState>,
    Query(params): Query<GetDataParams>,
) -> Result<Json<DataResponse>> {
    // Validate query parameters
    if let Some(error_msg) = params.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let response = state.store.get(&params.id).await?;

    Ok(Json(response))
}

/// Handler for POST /data
///
/// Persists the value to the backing store, then invalidates the cached
/// entry for the record.
pub async fn update_data_handler(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>> {
    // Validate request body
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    state.store.update(&req.id, &req.value).await?;

    Ok(Json(UpdateResponse::new(req.id)))
}

/// Handler for GET /stats
///
/// Returns current cache-aside statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.store.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
