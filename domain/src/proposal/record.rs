//! Upstream proposal record

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Proposal state reported by the hub once voting has ended
pub const STATE_CLOSED: &str = "closed";
/// Scores state reported by the hub once scores can no longer change
pub const SCORES_STATE_FINAL: &str = "final";

/// The first proposal matching a query, as returned by the hub
///
/// Every field is optional: the hub may return no match at all (the empty
/// record) or a partial one. Accessors only insist on a field when a caller
/// actually needs it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Ballot options, index-aligned with `scores`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Vote totals per choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    #[serde(
        default,
        rename(serialize = "scoresState", deserialize = "scores_state"),
        alias = "scoresState",
        skip_serializing_if = "Option::is_none"
    )]
    pub scores_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quorum: Option<f64>,
}

impl ProposalRecord {
    /// Build a record from an upstream JSON value.
    ///
    /// `null` and `{}` both yield the empty record.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| DomainError::MalformedRecord(e.to_string())),
            other => Err(DomainError::MalformedRecord(format!(
                "expected an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Voting has ended and the scores will not change anymore
    pub fn is_final(&self) -> bool {
        self.state.as_deref() == Some(STATE_CLOSED)
            && self.scores_state.as_deref() == Some(SCORES_STATE_FINAL)
    }

    /// `(state, scores_state)` for diagnostics, e.g. `(active, pending)`
    pub fn state_pair(&self) -> String {
        format!(
            "({}, {})",
            self.state.as_deref().unwrap_or("missing"),
            self.scores_state.as_deref().unwrap_or("missing")
        )
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
