//! Infrastructure layer for snapshot-resolver
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod graphql;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileOutputConfig, FileUpstreamConfig};
pub use graphql::{SnapshotGraphQlClient, first_proposal};
