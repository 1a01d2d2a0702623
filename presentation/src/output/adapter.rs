//! External-adapter response envelope
//!
//! ```json
//! { "jobRunID": "1", "data": { "result": {...} }, "result": {...}, "statusCode": 200 }
//! { "jobRunID": "1", "status": "errored", "statusCode": 400,
//!   "error": { "name": "input_validation_error", "message": "..." } }
//! ```

use super::formatter::OutputFormatter;
use resolver_application::ResolveProposalError;
use resolver_domain::ResolutionResult;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdapterSuccess<'a> {
    #[serde(rename = "jobRunID")]
    job_run_id: &'a str,
    data: AdapterData<'a>,
    result: &'a ResolutionResult,
    status_code: u16,
}

#[derive(Debug, Serialize)]
struct AdapterData<'a> {
    result: &'a ResolutionResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdapterFailure<'a> {
    #[serde(rename = "jobRunID")]
    job_run_id: &'a str,
    status: &'static str,
    status_code: u16,
    error: AdapterErrorBody,
}

#[derive(Debug, Serialize)]
struct AdapterErrorBody {
    name: &'static str,
    message: String,
}

/// Formats outcomes as external-adapter envelopes
pub struct AdapterFormatter {
    job_run_id: String,
}

impl AdapterFormatter {
    pub fn new(job_run_id: impl Into<String>) -> Self {
        Self {
            job_run_id: job_run_id.into(),
        }
    }

    /// HTTP-style status code for an error: 400 for bad input, 500 otherwise
    pub fn status_code(error: &ResolveProposalError) -> u16 {
        if error.is_input_error() { 400 } else { 500 }
    }
}

impl OutputFormatter for AdapterFormatter {
    fn format(&self, result: &ResolutionResult) -> String {
        let envelope = AdapterSuccess {
            job_run_id: &self.job_run_id,
            data: AdapterData { result },
            result,
            status_code: 200,
        };
        serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_error(&self, error: &ResolveProposalError) -> String {
        let envelope = AdapterFailure {
            job_run_id: &self.job_run_id,
            status: "errored",
            status_code: Self::status_code(error),
            error: AdapterErrorBody {
                name: error.kind(),
                message: error.to_string(),
            },
        };
        serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| "{}".to_string())
    }
}
