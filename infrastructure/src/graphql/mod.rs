//! **Snapshot GraphQL adapter** — implements
//! [`UpstreamDataPort`](resolver_application::UpstreamDataPort)
//!
//! | Step | Where |
//! |------|-------|
//! | POST `{query, variables}` to the hub | [`client`] |
//! | Unwrap `data.proposals[0]` from the response envelope | [`envelope`] |
//!
//! Transport failures (connection, non-2xx status, unparsable body,
//! GraphQL `errors`) all surface as
//! [`UpstreamError`](resolver_application::UpstreamError). An empty
//! `proposals` list is not an error: it yields `{}`.

mod client;
mod envelope;

pub use client::{DEFAULT_USER_AGENT, SnapshotGraphQlClient};
pub use envelope::first_proposal;
