//! Application-level configuration.
//!
//! - [`ResolverConfig`] — upstream endpoint and call timeout for the resolver

pub mod resolver_config;

pub use resolver_config::{DEFAULT_TIMEOUT_SECS, ResolverConfig, SNAPSHOT_GRAPHQL_ENDPOINT};
