//! Request field aliases
//!
//! Callers may spell each canonical field in several ways. The table below
//! lists, per field, the accepted keys in priority order; the first alias
//! carrying a non-empty value wins. Keys are case-sensitive.

use serde_json::{Map, Value};
use std::fmt;

/// A canonical request field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    ContentHash,
    ProposalId,
    Space,
    Author,
    RequireFinal,
}

/// Alias table: canonical field → accepted keys, highest priority first
pub const REQUEST_ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::ContentHash,
        &["contentHash", "CID", "proposalContentHash", "proposalCID"],
    ),
    (CanonicalField::ProposalId, &["proposalId", "proposalID"]),
    (CanonicalField::Space, &["space"]),
    (
        CanonicalField::Author,
        &["author", "proposalAuthor", "createdBy"],
    ),
    (
        CanonicalField::RequireFinal,
        &["final", "closed", "votingClosed", "finalScores"],
    ),
];

impl CanonicalField {
    pub const ALL: [CanonicalField; 5] = [
        CanonicalField::ContentHash,
        CanonicalField::ProposalId,
        CanonicalField::Space,
        CanonicalField::Author,
        CanonicalField::RequireFinal,
    ];

    /// Canonical (camelCase) name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::ContentHash => "contentHash",
            CanonicalField::ProposalId => "proposalId",
            CanonicalField::Space => "space",
            CanonicalField::Author => "author",
            CanonicalField::RequireFinal => "requireFinal",
        }
    }

    /// Accepted keys for this field, in priority order
    pub fn aliases(&self) -> &'static [&'static str] {
        REQUEST_ALIASES
            .iter()
            .find(|(field, _)| field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }

    /// Find the first alias of this field that carries a non-empty value.
    ///
    /// `null` and `""` count as empty and fall through to the next alias.
    pub fn resolve<'a>(&self, raw: &'a Map<String, Value>) -> Option<(&'static str, &'a Value)> {
        first_present(raw, self.aliases())
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the first `(alias, value)` pair in `aliases` order whose value is non-empty
pub fn first_present<'a>(
    raw: &'a Map<String, Value>,
    aliases: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    aliases.iter().find_map(|alias| match raw.get(*alias) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some((*alias, value)),
    })
}
