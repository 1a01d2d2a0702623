//! Resolve Proposal use case
//!
//! Looks up a single Snapshot proposal and determines its winning choice.
//!
//! ```text
//! validate ─▶ build query ─▶ upstream (one call) ─▶ finality gate ─▶ argmax
//! ```
//!
//! Exactly one upstream call is made per invocation, and none at all when
//! the input is invalid. Nothing is retried or cached here.

use crate::config::ResolverConfig;
use crate::ports::upstream_data::{UpstreamDataPort, UpstreamError};
use resolver_domain::{
    AdapterRequest, DEFAULT_JOB_RUN_ID, DomainError, GraphQlQuery, ProposalQuery, ProposalRecord,
    ResolutionResult,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while resolving a proposal
///
/// Exactly one of these is returned on failure; there are no partial results.
#[derive(Error, Debug)]
pub enum ResolveProposalError {
    #[error("{0}")]
    InputValidation(DomainError),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] UpstreamError),

    #[error("Proposal is not final. (Proposal state, Scores state): {observed}")]
    Finality {
        state: Option<String>,
        scores_state: Option<String>,
        observed: String,
    },

    #[error("Unusable upstream payload: {0}")]
    DataShape(DomainError),
}

impl ResolveProposalError {
    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveProposalError::InputValidation(_) => "input_validation_error",
            ResolveProposalError::Transport(_) => "transport_error",
            ResolveProposalError::Finality { .. } => "finality_error",
            ResolveProposalError::DataShape(_) => "data_shape_error",
        }
    }

    /// Whether the caller (rather than upstream) is at fault
    pub fn is_input_error(&self) -> bool {
        matches!(self, ResolveProposalError::InputValidation(_))
    }

    fn not_final(record: &ProposalRecord) -> Self {
        ResolveProposalError::Finality {
            state: record.state.clone(),
            scores_state: record.scores_state.clone(),
            observed: record.state_pair(),
        }
    }
}

impl From<DomainError> for ResolveProposalError {
    fn from(error: DomainError) -> Self {
        if error.is_input_error() {
            ResolveProposalError::InputValidation(error)
        } else {
            ResolveProposalError::DataShape(error)
        }
    }
}

/// Input for the ResolveProposal use case
#[derive(Debug, Clone)]
pub struct ResolveProposalInput {
    /// Correlation id forwarded to the upstream port
    pub job_run_id: String,
    pub query: ProposalQuery,
}

impl ResolveProposalInput {
    pub fn new(query: ProposalQuery) -> Self {
        Self {
            job_run_id: DEFAULT_JOB_RUN_ID.to_string(),
            query,
        }
    }

    pub fn with_job_run_id(mut self, job_run_id: impl Into<String>) -> Self {
        self.job_run_id = job_run_id.into();
        self
    }

    /// Normalize a raw (aliased) request into an input
    pub fn from_request(request: &AdapterRequest) -> Result<Self, ResolveProposalError> {
        let query = request.to_query()?;
        Ok(Self::new(query).with_job_run_id(request.job_run_id.clone()))
    }
}

/// Use case for resolving the outcome of a proposal
pub struct ResolveProposalUseCase<U: UpstreamDataPort + 'static> {
    upstream: Arc<U>,
    config: ResolverConfig,
    cancellation_token: Option<CancellationToken>,
}

impl<U: UpstreamDataPort + 'static> ResolveProposalUseCase<U> {
    pub fn new(upstream: Arc<U>, config: ResolverConfig) -> Self {
        Self {
            upstream,
            config,
            cancellation_token: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Normalize a raw request and resolve it
    pub async fn execute_request(
        &self,
        request: &AdapterRequest,
    ) -> Result<ResolutionResult, ResolveProposalError> {
        let input = ResolveProposalInput::from_request(request)?;
        self.execute(input).await
    }

    /// Execute the use case
    pub async fn execute(
        &self,
        input: ResolveProposalInput,
    ) -> Result<ResolutionResult, ResolveProposalError> {
        input.query.validate()?;

        info!(
            job_run_id = %input.job_run_id,
            proposal_id = input.query.proposal_id().unwrap_or_default(),
            content_hash = input.query.content_hash().unwrap_or_default(),
            require_final = input.query.require_final,
            "Resolving proposal"
        );

        let query = GraphQlQuery::from_query(&input.query);
        let record = self.fetch_record(&input.job_run_id, &query).await?;

        if input.query.require_final && !record.is_final() {
            warn!(
                job_run_id = %input.job_run_id,
                "Proposal not final: {}",
                record.state_pair()
            );
            return Err(ResolveProposalError::not_final(&record));
        }

        let result = ResolutionResult::from_record(record)?;

        info!(
            job_run_id = %input.job_run_id,
            winning_choice = %result.winning_choice,
            winning_score = result.winning_score,
            "Proposal resolved"
        );

        Ok(result)
    }

    /// The single upstream call, bounded by the timeout and cancellation token
    async fn fetch_record(
        &self,
        job_run_id: &str,
        query: &GraphQlQuery,
    ) -> Result<ProposalRecord, ResolveProposalError> {
        let variables = query.variables.to_map();
        debug!(
            endpoint = %self.config.graphql_endpoint,
            ?variables,
            "Querying upstream"
        );

        let call = self.upstream.query(
            job_run_id,
            query.text,
            &variables,
            &self.config.graphql_endpoint,
        );

        let bounded = async {
            match self.config.timeout {
                Some(timeout) => tokio::time::timeout(timeout, call)
                    .await
                    .unwrap_or(Err(UpstreamError::Timeout(timeout))),
                None => call.await,
            }
        };

        let response = if let Some(ref token) = self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(UpstreamError::Cancelled),
                response = bounded => response,
            }
        } else {
            bounded.await
        };

        let value = response.inspect_err(|e| warn!("Upstream query failed: {}", e))?;
        Ok(ProposalRecord::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    /// Records every call and answers with a canned response
    struct StubUpstream {
        response: Mutex<Option<Result<Value, UpstreamError>>>,
        calls: AtomicUsize,
        last_call: Mutex<Option<(String, Map<String, Value>, String)>>,
    }

    impl StubUpstream {
        fn returning(value: Value) -> Self {
            Self::with_response(Ok(value))
        }

        fn failing(error: UpstreamError) -> Self {
            Self::with_response(Err(error))
        }

        fn with_response(response: Result<Value, UpstreamError>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
                calls: AtomicUsize::new(0),
                last_call: Mutex::new(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_variables(&self) -> Map<String, Value> {
            self.last_call.lock().unwrap().clone().unwrap().1
        }
    }

    #[async_trait]
    impl UpstreamDataPort for StubUpstream {
        async fn query(
            &self,
            id: &str,
            _query_text: &str,
            variables: &Map<String, Value>,
            endpoint: &str,
        ) -> Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_call.lock().unwrap() =
                Some((id.to_string(), variables.clone(), endpoint.to_string()));
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(UpstreamError::ConnectionError("called twice".into())))
        }
    }

    /// Never answers within any reasonable timeout
    struct SlowUpstream;

    #[async_trait]
    impl UpstreamDataPort for SlowUpstream {
        async fn query(
            &self,
            _id: &str,
            _query_text: &str,
            _variables: &Map<String, Value>,
            _endpoint: &str,
        ) -> Result<Value, UpstreamError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(json!({}))
        }
    }

    // ==================== Helpers ====================

    fn proposal(state: &str, scores_state: &str) -> Value {
        json!({
            "id": "0xproposal",
            "choices": ["A", "B", "C"],
            "state": state,
            "scores": [10.0, 10.0, 5.0],
            "scores_state": scores_state,
            "votes": 25,
            "quorum": 0,
        })
    }

    fn use_case<U: UpstreamDataPort + 'static>(upstream: &Arc<U>) -> ResolveProposalUseCase<U> {
        ResolveProposalUseCase::new(Arc::clone(upstream), ResolverConfig::default())
    }

    fn request(value: Value) -> AdapterRequest {
        AdapterRequest::from_value(value).unwrap()
    }

    // ==================== Validation ====================

    #[tokio::test]
    async fn test_missing_identifiers_fail_before_any_call() {
        let upstream = Arc::new(StubUpstream::returning(proposal("closed", "final")));

        let err = use_case(&upstream)
            .execute_request(&request(json!({ "space": "ens.eth", "final": true })))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "input_validation_error");
        assert!(err.to_string().contains("\"proposalId\""));
        assert!(err.to_string().contains("\"contentHash\""));
        assert_eq!(upstream.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_identifiers_fail_before_any_call() {
        let upstream = Arc::new(StubUpstream::returning(proposal("closed", "final")));
        let input = ResolveProposalInput::new(ProposalQuery::by_id("").with_space("ens.eth"));

        let err = use_case(&upstream).execute(input).await.unwrap_err();

        assert!(err.is_input_error());
        assert_eq!(upstream.call_count(), 0);
    }

    #[tokio::test]
    async fn test_wrongly_typed_alias_is_input_error() {
        let upstream = Arc::new(StubUpstream::returning(proposal("closed", "final")));

        let err = use_case(&upstream)
            .execute_request(&request(json!({ "CID": "bafy", "closed": [] })))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "input_validation_error");
        assert_eq!(upstream.call_count(), 0);
    }

    // ==================== Query construction ====================

    #[tokio::test]
    async fn test_cid_alias_sends_same_query_as_content_hash() {
        let by_alias = Arc::new(StubUpstream::returning(proposal("active", "pending")));
        let canonical = Arc::new(StubUpstream::returning(proposal("active", "pending")));

        use_case(&by_alias)
            .execute_request(&request(json!({ "CID": "bafy123" })))
            .await
            .unwrap();
        use_case(&canonical)
            .execute_request(&request(json!({ "contentHash": "bafy123" })))
            .await
            .unwrap();

        assert_eq!(by_alias.last_variables(), canonical.last_variables());
        assert_eq!(
            Value::Object(by_alias.last_variables()),
            json!({ "id": "", "ipfs": "bafy123", "space": "", "author": "" })
        );
    }

    #[tokio::test]
    async fn test_job_run_id_and_endpoint_are_forwarded() {
        let upstream = Arc::new(StubUpstream::returning(proposal("closed", "final")));
        let config = ResolverConfig::default().with_endpoint("http://localhost:4000/graphql");

        ResolveProposalUseCase::new(Arc::clone(&upstream), config)
            .execute_request(&request(json!({
                "id": "job-42",
                "data": { "proposalId": "0x01", "createdBy": "0xabc" }
            })))
            .await
            .unwrap();

        let (id, variables, endpoint) = upstream.last_call.lock().unwrap().clone().unwrap();
        assert_eq!(id, "job-42");
        assert_eq!(endpoint, "http://localhost:4000/graphql");
        assert_eq!(variables["id"], "0x01");
        assert_eq!(variables["author"], "0xabc");
        assert_eq!(upstream.call_count(), 1);
    }

    // ==================== Winner selection ====================

    #[tokio::test]
    async fn test_tie_resolves_to_first_choice() {
        let upstream = Arc::new(StubUpstream::returning(proposal("closed", "final")));

        let result = use_case(&upstream)
            .execute(ResolveProposalInput::new(ProposalQuery::by_id("0xproposal")))
            .await
            .unwrap();

        assert_eq!(result.winning_choice, "A");
        assert_eq!(result.winning_score, 10.0);
        assert_eq!(result.record.id.as_deref(), Some("0xproposal"));
        assert_eq!(result.record.votes, Some(25));
    }

    #[tokio::test]
    async fn test_empty_upstream_result_is_data_shape_error() {
        let upstream = Arc::new(StubUpstream::returning(json!({})));

        let err = use_case(&upstream)
            .execute(ResolveProposalInput::new(ProposalQuery::by_id("0xmissing")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "data_shape_error");
        assert_eq!(upstream.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mismatched_lengths_is_data_shape_error() {
        let upstream = Arc::new(StubUpstream::returning(json!({
            "choices": ["A", "B"],
            "scores": [1.0, 2.0, 3.0],
        })));

        let err = use_case(&upstream)
            .execute(ResolveProposalInput::new(ProposalQuery::by_id("0x01")))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveProposalError::DataShape(_)));
    }

    // ==================== Finality ====================

    #[tokio::test]
    async fn test_require_final_rejects_open_proposal() {
        let upstream = Arc::new(StubUpstream::returning(proposal("active", "pending")));

        let err = use_case(&upstream)
            .execute_request(&request(json!({ "proposalId": "0x01", "final": true })))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "finality_error");
        assert!(err.to_string().contains("(active, pending)"));
        match err {
            ResolveProposalError::Finality {
                state,
                scores_state,
                ..
            } => {
                assert_eq!(state.as_deref(), Some("active"));
                assert_eq!(scores_state.as_deref(), Some("pending"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_require_final_rejects_closed_but_pending_scores() {
        let upstream = Arc::new(StubUpstream::returning(proposal("closed", "pending")));
        let input =
            ResolveProposalInput::new(ProposalQuery::by_id("0x01").with_require_final(true));

        let err = use_case(&upstream).execute(input).await.unwrap_err();

        assert!(err.to_string().contains("(closed, pending)"));
    }

    #[tokio::test]
    async fn test_require_final_on_empty_record_is_finality_error() {
        let upstream = Arc::new(StubUpstream::returning(Value::Null));
        let input =
            ResolveProposalInput::new(ProposalQuery::by_id("0x01").with_require_final(true));

        let err = use_case(&upstream).execute(input).await.unwrap_err();

        assert_eq!(err.kind(), "finality_error");
        assert!(err.to_string().contains("(missing, missing)"));
    }

    #[tokio::test]
    async fn test_require_final_accepts_closed_final() {
        let upstream = Arc::new(StubUpstream::returning(proposal("closed", "final")));
        let input =
            ResolveProposalInput::new(ProposalQuery::by_id("0x01").with_require_final(true));

        let result = use_case(&upstream).execute(input).await.unwrap();

        assert_eq!(result.winning_choice, "A");
    }

    #[tokio::test]
    async fn test_default_accepts_active_proposal() {
        let upstream = Arc::new(StubUpstream::returning(proposal("active", "pending")));

        let result = use_case(&upstream)
            .execute_request(&request(json!({ "proposalID": "0x01" })))
            .await
            .unwrap();

        assert_eq!(result.record.state.as_deref(), Some("active"));
        assert_eq!(result.winning_score, 10.0);
    }

    // ==================== Transport ====================

    #[tokio::test]
    async fn test_transport_error_is_surfaced_unmodified() {
        let upstream = Arc::new(StubUpstream::failing(UpstreamError::HttpStatus {
            status: 502,
            reason: "Bad Gateway".to_string(),
        }));

        let err = use_case(&upstream)
            .execute(ResolveProposalInput::new(ProposalQuery::by_id("0x01")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "transport_error");
        assert!(matches!(
            err,
            ResolveProposalError::Transport(UpstreamError::HttpStatus { status: 502, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_transport_error() {
        let upstream = Arc::new(SlowUpstream);
        let config = ResolverConfig::default().with_timeout(Some(Duration::from_secs(2)));

        let err = ResolveProposalUseCase::new(upstream, config)
            .execute(ResolveProposalInput::new(ProposalQuery::by_id("0x01")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveProposalError::Transport(UpstreamError::Timeout(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_is_transport_error() {
        let token = CancellationToken::new();
        token.cancel();

        let err = ResolveProposalUseCase::new(Arc::new(SlowUpstream), ResolverConfig::default())
            .with_cancellation(token)
            .execute(ResolveProposalInput::new(ProposalQuery::by_id("0x01")))
            .await
            .unwrap_err();

        match err {
            ResolveProposalError::Transport(e) => assert!(e.is_cancelled()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
