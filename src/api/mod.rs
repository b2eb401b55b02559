//! API Module
//!
//! HTTP handlers and routing for the data service REST API.
//!
//! # Endpoints
//! - `GET /data?id=<id>` - Read a record, cache-first
//! - `POST /data` - Update a record and invalidate its cache entry
//! - `GET /stats` - Get cache-aside statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
