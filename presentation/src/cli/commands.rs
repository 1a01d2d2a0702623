//! CLI command definitions

use clap::{Parser, ValueEnum};
use resolver_domain::AdapterRequest;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Output format for resolution results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Flat JSON object: winningChoice, winningScore and the proposal fields
    Json,
    /// Human-readable summary
    Summary,
    /// External-adapter envelope with jobRunID and statusCode
    Adapter,
}

impl From<OutputFormat> for resolver_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => resolver_domain::OutputFormat::Json,
            OutputFormat::Summary => resolver_domain::OutputFormat::Summary,
            OutputFormat::Adapter => resolver_domain::OutputFormat::Adapter,
        }
    }
}

/// CLI arguments for snapshot-resolver
#[derive(Parser, Debug)]
#[command(name = "snapshot-resolver")]
#[command(author, version, about = "Resolve the winning choice of a Snapshot proposal")]
#[command(long_about = r#"
snapshot-resolver looks up a Snapshot governance proposal and reports its
winning choice (highest score, first choice on ties).

A proposal is identified by its id or by the IPFS CID of its metadata; space
and author narrow the search. With --final the command fails unless voting
has closed and the scores are final.

Instead of flags, a raw request can be given with --request, either as an
external-adapter envelope or as a flat object. Accepted keys:
  contentHash | CID | proposalContentHash | proposalCID
  proposalId | proposalID
  space
  author | proposalAuthor | createdBy
  final | closed | votingClosed | finalScores

Configuration files are loaded from (in priority order):
1. --config <path>                 Explicit config file
2. ./snapshot-resolver.toml        Project-level config
3. ~/.config/snapshot-resolver/config.toml   Global config

Example:
  snapshot-resolver --proposal-id 0x8b65...
  snapshot-resolver --cid bafkrei... --space ens.eth --final
  snapshot-resolver --request '{"id":"7","data":{"proposalCID":"bafkrei...","closed":true}}' -o adapter
"#)]
pub struct Cli {
    /// Snapshot proposal id
    #[arg(long, value_name = "ID", conflicts_with = "request")]
    pub proposal_id: Option<String>,

    /// IPFS CID of the proposal metadata
    #[arg(long, visible_alias = "cid", value_name = "CID", conflicts_with = "request")]
    pub content_hash: Option<String>,

    /// Space the proposal belongs to (e.g. ens.eth)
    #[arg(long, conflicts_with = "request")]
    pub space: Option<String>,

    /// Address of the proposal author
    #[arg(long, value_name = "ADDRESS", conflicts_with = "request")]
    pub author: Option<String>,

    /// Fail unless the proposal is closed and its scores are final
    #[arg(long = "final", visible_alias = "closed", conflicts_with = "request")]
    pub require_final: bool,

    /// Raw request JSON (use "-" to read from stdin)
    #[arg(long, value_name = "JSON")]
    pub request: Option<String>,

    /// Job run id echoed in adapter output (defaults to the request's id, or "1")
    #[arg(long, value_name = "ID")]
    pub job_run_id: Option<String>,

    /// GraphQL endpoint (overrides config)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Upstream timeout in seconds, 0 disables (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (overrides config; default: json)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Build a request from the individual flags, keyed by canonical names
    pub fn flags_request(&self) -> AdapterRequest {
        let mut data = Map::new();
        let fields = [
            ("proposalId", &self.proposal_id),
            ("contentHash", &self.content_hash),
            ("space", &self.space),
            ("author", &self.author),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                data.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        if self.require_final {
            data.insert("final".to_string(), Value::Bool(true));
        }

        let request = AdapterRequest::from_data(data);
        match &self.job_run_id {
            Some(id) => request.with_job_run_id(id.clone()),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_canonical_request() {
        let cli = Cli::parse_from([
            "snapshot-resolver",
            "--cid",
            "bafy123",
            "--space",
            "ens.eth",
            "--final",
        ]);
        let request = cli.flags_request();
        let query = request.to_query().unwrap();

        assert_eq!(request.job_run_id, "1");
        assert_eq!(query.content_hash(), Some("bafy123"));
        assert_eq!(query.space(), Some("ens.eth"));
        assert!(query.require_final);
        assert!(query.proposal_id().is_none());
    }

    #[test]
    fn test_job_run_id_flag() {
        let cli = Cli::parse_from([
            "snapshot-resolver",
            "--proposal-id",
            "0x01",
            "--job-run-id",
            "abc",
        ]);
        assert_eq!(cli.flags_request().job_run_id, "abc");
    }

    #[test]
    fn test_request_conflicts_with_flags() {
        let result = Cli::try_parse_from([
            "snapshot-resolver",
            "--request",
            "{}",
            "--proposal-id",
            "0x01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_and_verbosity() {
        let cli = Cli::parse_from(["snapshot-resolver", "-o", "adapter", "-vv", "--cid", "x"]);
        assert_eq!(cli.output, Some(OutputFormat::Adapter));
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            resolver_domain::OutputFormat::from(OutputFormat::Summary),
            resolver_domain::OutputFormat::Summary
        );
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
