//! CLI entrypoint for snapshot-resolver
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use resolver_application::{ResolveProposalError, ResolveProposalUseCase};
use resolver_domain::{AdapterRequest, DEFAULT_JOB_RUN_ID, OutputFormat};
use resolver_infrastructure::{ConfigLoader, FileConfig, SnapshotGraphQlClient};
use resolver_presentation::{Cli, formatter_for};
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit code for a request the caller got wrong
const EXIT_INPUT_ERROR: u8 = 2;
/// Exit code for any other resolution failure
const EXIT_RESOLUTION_ERROR: u8 = 1;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        println!("{}", ConfigLoader::describe_config_sources());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    let file_config = apply_overrides(file_config, &cli);

    let issues = file_config.validate();
    for issue in &issues {
        warn!("{}", issue.message);
    }
    if let Some(issue) = issues.iter().find(|i| i.is_error()) {
        bail!("Invalid configuration: {}", issue.message);
    }

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(file_config.output.format)
        .unwrap_or_default();
    if cli.no_color || !file_config.output.color {
        colored::control::set_override(false);
    }

    // === Request ===
    let request = match &cli.request {
        Some(raw) => parse_request(raw, cli.job_run_id.as_deref())?,
        None => Ok(cli.flags_request()),
    };
    let job_run_id = match &request {
        Ok(request) => request.job_run_id.clone(),
        Err(_) => cli
            .job_run_id
            .clone()
            .unwrap_or_else(|| DEFAULT_JOB_RUN_ID.to_string()),
    };
    let formatter = formatter_for(format, &job_run_id);

    // === Dependency Injection ===
    let upstream = Arc::new(
        SnapshotGraphQlClient::new(&file_config.upstream.user_agent)
            .context("Failed to create GraphQL client")?,
    );
    let cancellation = CancellationToken::new();
    let use_case =
        ResolveProposalUseCase::new(upstream, file_config.upstream.to_resolver_config())
            .with_cancellation(cancellation.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancellation.cancel();
        }
    });

    info!("Starting snapshot-resolver (job run {})", job_run_id);

    let outcome = match request {
        Ok(request) => use_case.execute_request(&request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            println!("{}", formatter.format(&result));
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let code = if error.is_input_error() {
                EXIT_INPUT_ERROR
            } else {
                EXIT_RESOLUTION_ERROR
            };
            let rendered = formatter.format_error(&error);
            if format == OutputFormat::Summary {
                eprintln!("{}", rendered);
            } else {
                println!("{}", rendered);
            }
            Ok(ExitCode::from(code))
        }
    }
}

/// CLI flags take precedence over configuration files
fn apply_overrides(mut config: FileConfig, cli: &Cli) -> FileConfig {
    if let Some(endpoint) = &cli.endpoint {
        config.upstream.graphql_endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.upstream.timeout_secs = timeout;
    }
    config
}

/// Parse `--request` JSON (or stdin for "-").
///
/// Unreadable or non-JSON input is a usage error; a well-formed JSON value
/// of the wrong shape becomes an input validation error of the resolution.
fn parse_request(
    raw: &str,
    job_run_id: Option<&str>,
) -> Result<Result<AdapterRequest, ResolveProposalError>> {
    let text = if raw == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        raw.to_string()
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).context("Request is not valid JSON")?;

    Ok(AdapterRequest::from_value(value)
        .map(|request| match job_run_id {
            Some(id) => request.with_job_run_id(id),
            None => request,
        })
        .map_err(ResolveProposalError::from))
}
