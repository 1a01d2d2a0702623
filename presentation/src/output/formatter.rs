//! Output formatter trait

use super::adapter::AdapterFormatter;
use super::console::ConsoleFormatter;
use resolver_application::ResolveProposalError;
use resolver_domain::{OutputFormat, ResolutionResult};
use serde_json::json;

/// Trait for formatting resolution outcomes
pub trait OutputFormatter {
    /// Format a successful resolution
    fn format(&self, result: &ResolutionResult) -> String;

    /// Format a failed resolution
    fn format_error(&self, error: &ResolveProposalError) -> String;
}

/// Plain JSON: the result object, or `{"error": {"kind", "message"}}`
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &ResolutionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_error(&self, error: &ResolveProposalError) -> String {
        let body = json!({
            "error": {
                "kind": error.kind(),
                "message": error.to_string(),
            }
        });
        serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Pick the formatter for `format`; `job_run_id` is only used by the adapter envelope
pub fn formatter_for(format: OutputFormat, job_run_id: &str) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Summary => Box::new(ConsoleFormatter),
        OutputFormat::Adapter => Box::new(AdapterFormatter::new(job_run_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolver_application::UpstreamError;
    use resolver_domain::ProposalRecord;
    use serde_json::Value;

    fn result() -> ResolutionResult {
        ResolutionResult::from_record(ProposalRecord {
            choices: Some(vec!["Yes".to_string(), "No".to_string()]),
            scores: Some(vec![5.0, 1.0]),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_json_result() {
        let output: Value = serde_json::from_str(&JsonFormatter.format(&result())).unwrap();
        assert_eq!(output["winningChoice"], "Yes");
        assert_eq!(output["winningScore"], 5.0);
    }

    #[test]
    fn test_json_error_has_kind_and_message() {
        let error = ResolveProposalError::from(UpstreamError::Cancelled);
        let output: Value = serde_json::from_str(&JsonFormatter.format_error(&error)).unwrap();
        assert_eq!(output["error"]["kind"], "transport_error");
        assert_eq!(
            output["error"]["message"],
            "Upstream request failed: Operation cancelled"
        );
    }

    #[test]
    fn test_formatter_for_adapter_uses_job_run_id() {
        let formatter = formatter_for(OutputFormat::Adapter, "job-9");
        let output: Value = serde_json::from_str(&formatter.format(&result())).unwrap();
        assert_eq!(output["jobRunID"], "job-9");
    }
}
