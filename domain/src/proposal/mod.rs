//! Proposal resolution domain
//!
//! Everything needed to turn a caller's request into an upstream query and
//! the upstream record into a [`ResolutionResult`], without any I/O.
//!
//! ```text
//! raw request ──▶ alias table ──▶ ProposalQuery ──▶ GraphQlQuery
//!                                                       │ (upstream)
//! ResolutionResult ◀── select_winner ◀── ProposalRecord ◀┘
//! ```

pub mod alias;
pub mod outcome;
pub mod query;
pub mod query_builder;
pub mod record;
pub mod request;

pub use alias::{CanonicalField, REQUEST_ALIASES};
pub use outcome::{ResolutionResult, Winner, select_winner};
pub use query::ProposalQuery;
pub use query_builder::{GraphQlQuery, PROPOSAL_QUERY, ProposalVariables, build_proposal_query};
pub use record::ProposalRecord;
pub use request::{AdapterRequest, DEFAULT_JOB_RUN_ID};
