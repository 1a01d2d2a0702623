//! Upstream configuration from TOML (`[upstream]` section)

use crate::graphql::DEFAULT_USER_AGENT;
use resolver_application::config::{DEFAULT_TIMEOUT_SECS, ResolverConfig, SNAPSHOT_GRAPHQL_ENDPOINT};
use resolver_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw upstream configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpstreamConfig {
    /// GraphQL endpoint of the Snapshot hub
    pub graphql_endpoint: String,
    /// Upstream call timeout in seconds (0 disables the timeout)
    pub timeout_secs: u64,
    /// User-Agent header sent to the hub
    pub user_agent: String,
}

impl Default for FileUpstreamConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: SNAPSHOT_GRAPHQL_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FileUpstreamConfig {
    pub fn to_resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default()
            .with_endpoint(self.graphql_endpoint.clone())
            .with_timeout_seconds(Some(self.timeout_secs))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let endpoint = self.graphql_endpoint.trim();
        if endpoint.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "upstream.graphql_endpoint".to_string(),
                },
                "upstream.graphql_endpoint: must not be empty",
            ));
        } else if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidEndpointScheme {
                    value: self.graphql_endpoint.clone(),
                },
                format!(
                    "upstream.graphql_endpoint: '{}' is not an http(s) URL",
                    self.graphql_endpoint
                ),
            ));
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout {
                    field: "upstream.timeout_secs".to_string(),
                },
                "upstream.timeout_secs = 0: upstream calls will never time out",
            ));
        }

        if self.user_agent.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "upstream.user_agent".to_string(),
                },
                "upstream.user_agent: empty, the hub may reject anonymous clients",
            ));
        }

        issues
    }
}
