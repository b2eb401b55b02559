//! Request and Response models for the data service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{GetDataParams, UpdateRequest};
pub use responses::{
    DataResponse, ErrorResponse, HealthResponse, Source, StatsResponse, UpdateResponse,
};
