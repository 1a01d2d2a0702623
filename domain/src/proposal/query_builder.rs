//! GraphQL query construction for the Snapshot hub.
//!
//! Pure and total: every combination of inputs yields a query. Unset fields
//! are sent as `""`, which the hub treats as "no constraint".

use super::query::ProposalQuery;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query for the most recently created proposal matching the filters
pub const PROPOSAL_QUERY: &str = r#"
query Proposal($id: String, $ipfs: String, $space: String, $author: String) {
  proposals(
    first: 1,
    skip: 0,
    where: {
      id: $id,
      ipfs: $ipfs,
      space: $space,
      author: $author
    },
    orderBy: "created",
    orderDirection: desc
  ) {
    id
    choices
    state
    scores
    scores_state
    votes
    quorum
  }
}
"#;

/// Variables for [`PROPOSAL_QUERY`]; `ipfs` carries the content hash
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalVariables {
    pub id: String,
    pub ipfs: String,
    pub space: String,
    pub author: String,
}

impl ProposalVariables {
    /// Variables as a JSON object, every key present
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert("ipfs".to_string(), Value::String(self.ipfs.clone()));
        map.insert("space".to_string(), Value::String(self.space.clone()));
        map.insert("author".to_string(), Value::String(self.author.clone()));
        map
    }
}

/// A ready-to-send GraphQL query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlQuery {
    pub text: &'static str,
    pub variables: ProposalVariables,
}

impl GraphQlQuery {
    pub fn from_query(query: &ProposalQuery) -> Self {
        build_proposal_query(
            query.proposal_id(),
            query.content_hash(),
            query.space(),
            query.author(),
        )
    }
}

pub fn build_proposal_query(
    proposal_id: Option<&str>,
    content_hash: Option<&str>,
    space: Option<&str>,
    author: Option<&str>,
) -> GraphQlQuery {
    GraphQlQuery {
        text: PROPOSAL_QUERY,
        variables: ProposalVariables {
            id: proposal_id.unwrap_or_default().to_string(),
            ipfs: content_hash.unwrap_or_default().to_string(),
            space: space.unwrap_or_default().to_string(),
            author: author.unwrap_or_default().to_string(),
        },
    }
}
