//! Resolver configuration.
//!
//! [`ResolverConfig`] controls where the resolver sends its single upstream
//! query and how long it waits for it.

use std::time::Duration;

/// Public Snapshot hub GraphQL endpoint
pub const SNAPSHOT_GRAPHQL_ENDPOINT: &str = "https://hub.snapshot.org/graphql";

/// Default upper bound for the upstream call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// GraphQL endpoint passed to the upstream port
    pub graphql_endpoint: String,
    /// Maximum time to wait for the upstream call; `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: SNAPSHOT_GRAPHQL_ENDPOINT.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ResolverConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.graphql_endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a config from an optional timeout in seconds.
    ///
    /// `None` and `0` both disable the timeout.
    pub fn with_timeout_seconds(self, seconds: Option<u64>) -> Self {
        self.with_timeout(seconds.filter(|s| *s > 0).map(Duration::from_secs))
    }
}
