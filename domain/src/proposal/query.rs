//! Proposal query value object

use super::alias::CanonicalField;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The resolved identifying criteria for one proposal lookup
///
/// # Example
///
/// ```
/// use resolver_domain::ProposalQuery;
///
/// let query = ProposalQuery::by_content_hash("bafy123").with_space("ens.eth");
/// assert!(query.validate().is_ok());
/// assert!(ProposalQuery::default().validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalQuery {
    pub proposal_id: Option<String>,
    /// IPFS CID of the proposal metadata
    pub content_hash: Option<String>,
    pub space: Option<String>,
    /// Address of the proposal creator
    pub author: Option<String>,
    /// Fail unless the proposal is closed and its scores are final
    #[serde(default)]
    pub require_final: bool,
}

impl ProposalQuery {
    pub fn by_id(proposal_id: impl Into<String>) -> Self {
        Self {
            proposal_id: Some(proposal_id.into()),
            ..Default::default()
        }
    }

    pub fn by_content_hash(content_hash: impl Into<String>) -> Self {
        Self {
            content_hash: Some(content_hash.into()),
            ..Default::default()
        }
    }

    pub fn with_space(mut self, space: impl Into<String>) -> Self {
        self.space = Some(space.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_require_final(mut self, require_final: bool) -> Self {
        self.require_final = require_final;
        self
    }

    /// Normalize a raw request mapping through the alias table.
    ///
    /// Only type errors are reported here; call [`validate`](Self::validate)
    /// to check that an identifier is present.
    pub fn from_request(raw: &Map<String, Value>) -> Result<Self, DomainError> {
        Ok(Self {
            proposal_id: resolve_string(raw, CanonicalField::ProposalId)?,
            content_hash: resolve_string(raw, CanonicalField::ContentHash)?,
            space: resolve_string(raw, CanonicalField::Space)?,
            author: resolve_string(raw, CanonicalField::Author)?,
            require_final: resolve_bool(raw, CanonicalField::RequireFinal)?.unwrap_or(false),
        })
    }

    /// Whether at least one of `proposal_id` / `content_hash` is non-empty
    pub fn has_identifier(&self) -> bool {
        non_empty(&self.proposal_id).is_some() || non_empty(&self.content_hash).is_some()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.has_identifier() {
            Ok(())
        } else {
            Err(DomainError::MissingIdentifier)
        }
    }

    pub fn proposal_id(&self) -> Option<&str> {
        non_empty(&self.proposal_id)
    }

    pub fn content_hash(&self) -> Option<&str> {
        non_empty(&self.content_hash)
    }

    pub fn space(&self) -> Option<&str> {
        non_empty(&self.space)
    }

    pub fn author(&self) -> Option<&str> {
        non_empty(&self.author)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn resolve_string(
    raw: &Map<String, Value>,
    field: CanonicalField,
) -> Result<Option<String>, DomainError> {
    match field.resolve(raw) {
        None => Ok(None),
        Some((_, Value::String(s))) => Ok(Some(s.clone())),
        Some((alias, _)) => Err(DomainError::InvalidField {
            field: field.as_str(),
            alias: alias.to_string(),
            expected: "a string",
        }),
    }
}

fn resolve_bool(
    raw: &Map<String, Value>,
    field: CanonicalField,
) -> Result<Option<bool>, DomainError> {
    let invalid = |alias: &str| DomainError::InvalidField {
        field: field.as_str(),
        alias: alias.to_string(),
        expected: "a boolean",
    };

    match field.resolve(raw) {
        None => Ok(None),
        Some((_, Value::Bool(b))) => Ok(Some(*b)),
        Some((alias, Value::String(s))) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(invalid(alias)),
        },
        Some((alias, _)) => Err(invalid(alias)),
    }
}
