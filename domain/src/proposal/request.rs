//! Incoming request envelope
//!
//! Requests arrive either as the external-adapter envelope
//! `{"id": "<job run id>", "data": {...}}` or as a flat mapping of aliased
//! keys. Both carry an optional job run id that is echoed back.

use super::query::ProposalQuery;
use crate::core::error::DomainError;
use serde_json::{Map, Value};

/// Job run id used when the request does not carry one
pub const DEFAULT_JOB_RUN_ID: &str = "1";

/// A raw request: job run id plus the aliased parameters
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterRequest {
    pub job_run_id: String,
    pub data: Map<String, Value>,
}

impl AdapterRequest {
    pub fn from_data(data: Map<String, Value>) -> Self {
        Self {
            job_run_id: DEFAULT_JOB_RUN_ID.to_string(),
            data,
        }
    }

    pub fn with_job_run_id(mut self, job_run_id: impl Into<String>) -> Self {
        self.job_run_id = job_run_id.into();
        self
    }

    /// Parse a request from JSON, accepting both envelope and flat shapes
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        let Value::Object(mut root) = value else {
            return Err(DomainError::InvalidField {
                field: "request",
                alias: "<root>".to_string(),
                expected: "a JSON object",
            });
        };

        let job_run_id = match root.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => DEFAULT_JOB_RUN_ID.to_string(),
        };

        let data = match root.remove("data") {
            Some(Value::Object(data)) => data,
            Some(Value::Null) | None => root,
            Some(_) => {
                return Err(DomainError::InvalidField {
                    field: "data",
                    alias: "data".to_string(),
                    expected: "a JSON object",
                });
            }
        };

        Ok(Self { job_run_id, data })
    }

    /// Normalize the aliased parameters into a query (not yet validated)
    pub fn to_query(&self) -> Result<ProposalQuery, DomainError> {
        ProposalQuery::from_request(&self.data)
    }
}
