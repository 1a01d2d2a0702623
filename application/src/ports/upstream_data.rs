//! Upstream data port
//!
//! Defines the interface for querying the upstream voting-data service.
//! The resolver only ever sees the first matching record; envelope parsing,
//! retries and rate limiting are the adapter's business.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the upstream service
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Upstream query rejected: {0}")]
    QueryRejected(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,
}

impl UpstreamError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UpstreamError::Cancelled)
    }
}

/// Port for querying the upstream voting-data service
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait UpstreamDataPort: Send + Sync {
    /// Run `query_text` with `variables` against `endpoint`.
    ///
    /// Returns the first matching record, or an empty object (or `null`)
    /// when nothing matched. `id` is the caller's job run id and is only
    /// used for correlation.
    async fn query(
        &self,
        id: &str,
        query_text: &str,
        variables: &Map<String, Value>,
        endpoint: &str,
    ) -> Result<Value, UpstreamError>;
}
