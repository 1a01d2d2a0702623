//! HTTP client for the Snapshot hub GraphQL API

use super::envelope::first_proposal;
use async_trait::async_trait;
use resolver_application::{UpstreamDataPort, UpstreamError};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("snapshot-resolver/", env!("CARGO_PKG_VERSION"));

/// Request body of a GraphQL POST
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Map<String, Value>,
}

/// Queries the Snapshot hub over HTTP
///
/// One POST per query, no retries. Timeouts are enforced by the caller.
#[derive(Debug, Clone)]
pub struct SnapshotGraphQlClient {
    client: reqwest::Client,
}

impl SnapshotGraphQlClient {
    pub fn new(user_agent: &str) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                UpstreamError::ConnectionError(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UpstreamDataPort for SnapshotGraphQlClient {
    async fn query(
        &self,
        id: &str,
        query_text: &str,
        variables: &Map<String, Value>,
        endpoint: &str,
    ) -> Result<Value, UpstreamError> {
        debug!(job_run_id = id, endpoint, "POST GraphQL query");

        let response = self
            .client
            .post(endpoint)
            .json(&GraphQlRequest {
                query: query_text,
                variables,
            })
            .send()
            .await
            .map_err(|e| UpstreamError::ConnectionError(format!("Failed to reach {}: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(job_run_id = id, status = status.as_u16(), "GraphQL endpoint returned an error status");
            return Err(UpstreamError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let envelope: Value = response.json().await.map_err(|e| {
            UpstreamError::MalformedEnvelope(format!("Failed to parse response body: {}", e))
        })?;

        first_proposal(envelope)
    }
}
