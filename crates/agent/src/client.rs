use async_trait::async_trait;
use nutrafuel_core::domain::agent::{AgentId, AgentProfile};
use nutrafuel_core::routing::Response;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::QueryError;

/// Retrieval depth for agents outside the directory.
pub const DEFAULT_RETRIEVAL_K: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentQuery {
    pub query: String,
    pub agent: AgentId,
    pub k: u32,
}

impl AgentQuery {
    pub fn new(agent: AgentId, query: impl Into<String>) -> Self {
        let k = AgentProfile::lookup(&agent)
            .map(|profile| profile.retrieval_k)
            .unwrap_or(DEFAULT_RETRIEVAL_K);
        Self { query: query.into(), agent, k }
    }

    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }
}

/// Answers agent queries, either locally or through the HTTP API.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn query(&self, request: &AgentQuery) -> Result<Response, QueryError>;
}

#[derive(Debug)]
pub enum QueryOutcome {
    Completed(Result<Response, QueryError>),
    /// The caller gave up; any late reply is dropped.
    Cancelled,
}

/// Runs `request`, abandoning it as soon as `cancel` fires.
pub async fn query_cancellable(
    client: &dyn AgentClient,
    request: &AgentQuery,
    cancel: &CancellationToken,
) -> QueryOutcome {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::info!(
                event_name = "agent.query.cancelled",
                agent_id = %request.agent,
                "agent query cancelled by caller"
            );
            QueryOutcome::Cancelled
        }
        result = client.query(request) => QueryOutcome::Completed(result),
    }
}
