//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the payload under
/// - `value`: Any JSON payload
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The payload to store
    pub value: Value,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Request body for the version change (PUT /version)
#[derive(Debug, Clone, Deserialize)]
pub struct VersionRequest {
    /// New version tag
    pub version: String,
}

impl VersionRequest {
    pub fn validate(&self) -> Option<String> {
        if self.version.trim().is_empty() {
            return Some("Version cannot be empty".to_string());
        }
        None
    }
}
