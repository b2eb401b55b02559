//! Request DTOs for the data service API
//!
//! Defines the structure of incoming HTTP request parameters and bodies.

use serde::Deserialize;

/// Query parameters for the read operation (GET /data)
#[derive(Debug, Clone, Deserialize)]
pub struct GetDataParams {
    /// The record id to look up
    pub id: String,
}

impl GetDataParams {
    /// Validates the query parameters.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_id(&self.id)
    }
}

/// Request body for the update operation (POST /data)
///
/// # Fields
/// - `id`: The record id to update
/// - `value`: The value to persist in the backing store
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    /// The record id
    pub id: String,
    /// The value to persist
    pub value: String,
}

impl UpdateRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_id(&self.id)
    }
}

/// Id validation shared by both operations.
fn validate_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return Some("Id cannot be empty".to_string());
    }
    if id.len() > 256 {
        return Some("Id exceeds maximum length of 256 characters".to_string());
    }
    None
}
