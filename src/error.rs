//! Error types for the data service
//!
//! Provides the error taxonomy using thiserror. Backing-store failures always
//! propagate to the caller; cache failures stay internal to the store.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Backing Store Error ==
/// The backing store is unreachable or rejected the operation.
///
/// Surfaced to the caller of `get`/`update`; never silently swallowed.
#[derive(Error, Debug)]
pub enum BackingStoreError {
    /// The store could not be reached
    #[error("Backing store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the operation
    #[error("Backing store rejected the operation: {0}")]
    Rejected(String),
}

// == Cache Unavailable ==
/// The cache collaborator failed at the transport level.
///
/// Internal only: reads degrade to a miss and invalidation failures are
/// logged, so this never reaches the HTTP surface.
#[derive(Error, Debug)]
#[error("Cache unavailable: {0}")]
pub struct CacheUnavailable(pub String);

// == Service Error Enum ==
/// Top-level error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The source of truth failed; the request cannot be served
    #[error("Backing store error: {0}")]
    BackingStore(#[from] BackingStoreError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::BackingStore(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP surface.
pub type Result<T> = std::result::Result<T, ServiceError>;
