//! Error types for the item API client.
//!
//! # Design
//! Failures are split by origin only. Every non-2xx response lands in
//! `Status` with its code and body; no status code gets a dedicated
//! variant, so a 404 and a 500 propagate the same way.

use serde_json::Value;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `ItemClient` parse methods and `ItemApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout, aborted request).
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {text}")]
    Status {
        status: u16,
        /// The response body, when it was valid JSON.
        body: Option<Value>,
        text: String,
    },

    /// The response body could not be decoded into the expected type.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serializing payload failed: {0}")]
    Serialize(String),
}

impl ApiError {
    /// HTTP status code, for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
