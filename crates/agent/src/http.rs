use std::time::Duration;

use async_trait::async_trait;
use nutrafuel_core::config::BackendConfig;
use nutrafuel_core::domain::agent::{AgentId, AgentTier};
use nutrafuel_core::routing::{Response, Source};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::client::{AgentClient, AgentQuery};
use crate::error::QueryError;

/// Talks to the agent API over HTTP. Requests are sent once; failures are not retried.
#[derive(Clone, Debug)]
pub struct HttpAgentClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    timeout: Duration,
    customer_experience_timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct WireReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    sources: Vec<Source>,
}

impl HttpAgentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(18),
            customer_experience_timeout: Duration::from_secs(12),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            customer_experience_timeout: Duration::from_secs(
                config.customer_experience_timeout_secs,
            ),
            ..Self::new(config.base_url.clone())
        }
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeouts(mut self, default: Duration, customer_experience: Duration) -> Self {
        self.timeout = default;
        self.customer_experience_timeout = customer_experience;
        self
    }

    pub fn timeout_for(&self, agent: &AgentId) -> Duration {
        match agent {
            AgentId::CustomerExperience => self.customer_experience_timeout,
            _ => self.timeout,
        }
    }

    /// Tiered endpoint for known agents, the legacy `/query` route otherwise.
    pub fn endpoint_for(&self, agent: &AgentId) -> String {
        let path = match agent.tier() {
            Some(AgentTier::Frontend) => "/query/frontend",
            Some(AgentTier::Backend) => "/query/backend",
            None => "/query",
        };
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn query(&self, request: &AgentQuery) -> Result<Response, QueryError> {
        let url = self.endpoint_for(&request.agent);
        let timeout = self.timeout_for(&request.agent);

        let mut builder = self.client.post(&url).json(request).timeout(timeout);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key.expose_secret());
        }

        let response = builder.send().await.map_err(|error| transport_error(error, timeout))?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                event_name = "agent.http.rejected",
                agent_id = %request.agent,
                status = status.as_u16(),
                url = %url,
                "agent backend returned an error status"
            );
            return Err(QueryError::from_status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|error| transport_error(error, timeout))?;
        // A successful status with an unreadable body counts as an empty reply.
        let reply = serde_json::from_slice::<WireReply>(&body).unwrap_or_else(|error| {
            tracing::warn!(
                event_name = "agent.http.undecodable_reply",
                agent_id = %request.agent,
                error = %error,
                "agent backend reply was not valid JSON"
            );
            WireReply::default()
        });

        let mut answer = Response::new(request.agent.clone(), reply.response.unwrap_or_default());
        answer.sources = reply.sources;
        Ok(answer)
    }
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> QueryError {
    if error.is_timeout() {
        QueryError::Timeout(timeout)
    } else {
        QueryError::Transport(error.to_string())
    }
}
