//! Domain layer for snapshot-resolver
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Proposal Query
//!
//! A Snapshot proposal is looked up by its **id** or by the **content hash**
//! (IPFS CID) of its metadata, optionally narrowed by space and author.
//! Callers may spell each field under several aliases; see
//! [`proposal::alias`] for the resolution table.
//!
//! ## Resolution
//!
//! Once the upstream record is known, the winning choice is the one with the
//! highest score (lowest index on ties). Finality is only enforced when the
//! caller asks for it.

pub mod config;
pub mod core;
pub mod proposal;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use proposal::{
    AdapterRequest, CanonicalField, DEFAULT_JOB_RUN_ID, GraphQlQuery, PROPOSAL_QUERY,
    ProposalQuery, ProposalRecord, ProposalVariables, REQUEST_ALIASES, ResolutionResult, Winner,
    build_proposal_query, select_winner,
};
