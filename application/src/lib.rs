//! Application layer for snapshot-resolver
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ResolverConfig, SNAPSHOT_GRAPHQL_ENDPOINT};
pub use ports::upstream_data::{UpstreamDataPort, UpstreamError};
pub use use_cases::resolve_proposal::{
    ResolveProposalError, ResolveProposalInput, ResolveProposalUseCase,
};
