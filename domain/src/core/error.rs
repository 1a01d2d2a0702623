//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Request is missing both \"proposalId\" and \"contentHash\". One is required.")]
    MissingIdentifier,

    #[error("Invalid value for \"{field}\" (given as \"{alias}\"): expected {expected}")]
    InvalidField {
        field: &'static str,
        alias: String,
        expected: &'static str,
    },

    #[error("Malformed proposal record: {0}")]
    MalformedRecord(String),
}

impl DomainError {
    /// Check if this error was caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingIdentifier | DomainError::InvalidField { .. }
        )
    }
}
