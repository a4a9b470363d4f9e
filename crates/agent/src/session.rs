use std::sync::Arc;

use nutrafuel_core::charts::ChartPayload;
use nutrafuel_core::domain::agent::{AgentId, AgentProfile, AgentTier};
use nutrafuel_core::domain::message::{Message, Transcript};
use nutrafuel_core::routing::{attach_artifacts, display_name, Routed};
use tokio_util::sync::CancellationToken;

use crate::client::{query_cancellable, AgentClient, AgentQuery, QueryOutcome};
use crate::error::{QueryError, GENERIC_ERROR_MESSAGE};

pub const ADMIN_EMPTY_REPLY: &str = "I apologize, I encountered an issue processing your request.";
pub const STOREFRONT_EMPTY_REPLY: &str = "Sorry, I encountered an issue.";

const DEFAULT_LOADING_MESSAGE: &str = "Processing your request...";

#[derive(Debug)]
pub enum SendOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    Replied,
    /// The error's user message was appended to the transcript.
    Failed(QueryError),
    /// The reply was dropped and the transcript only holds the user message.
    Cancelled,
}

/// One conversation with one agent.
///
/// Admin agents get charts and landing page previews attached to each reply. Storefront
/// agents get plain text and a single generic error message.
pub struct ChatSession {
    client: Arc<dyn AgentClient>,
    agent: AgentId,
    profile: Option<AgentProfile>,
    retrieval_k: Option<u32>,
    transcript: Transcript,
    chart: Option<ChartPayload>,
    landing_page: Option<String>,
}

impl ChatSession {
    /// Starts the conversation with the agent's greeting.
    pub fn open(client: Arc<dyn AgentClient>, agent: AgentId) -> Self {
        let profile = AgentProfile::lookup(&agent);
        let greeting = match &profile {
            Some(profile) => profile.greeting(),
            None => {
                format!("Hi! I'm {}. How can I help you today?", display_name(agent.as_str()))
            }
        };
        Self {
            client,
            agent,
            profile,
            retrieval_k: None,
            transcript: Transcript::starting_with(Message::assistant(greeting)),
            chart: None,
            landing_page: None,
        }
    }

    pub fn with_retrieval_k(mut self, k: Option<u32>) -> Self {
        self.retrieval_k = k;
        self
    }

    pub fn agent(&self) -> &AgentId {
        &self.agent
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Chart for the most recent admin reply.
    pub fn chart(&self) -> Option<&ChartPayload> {
        self.chart.as_ref()
    }

    pub fn landing_page(&self) -> Option<&str> {
        self.landing_page.as_deref()
    }

    pub fn loading_message(&self) -> &'static str {
        self.profile
            .as_ref()
            .map(|profile| profile.loading_message)
            .unwrap_or(DEFAULT_LOADING_MESSAGE)
    }

    fn is_admin(&self) -> bool {
        self.agent.tier() == Some(AgentTier::Backend)
    }

    pub async fn send(&mut self, input: &str, cancel: &CancellationToken) -> SendOutcome {
        if input.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        self.transcript.push(Message::user(input));
        let mut request = AgentQuery::new(self.agent.clone(), input);
        if let Some(k) = self.retrieval_k {
            request = request.with_k(k);
        }

        let result = match query_cancellable(self.client.as_ref(), &request, cancel).await {
            QueryOutcome::Cancelled => return SendOutcome::Cancelled,
            QueryOutcome::Completed(result) => result,
        };

        match result {
            Ok(mut response) => {
                if response.text.trim().is_empty() {
                    response.text = if self.is_admin() {
                        ADMIN_EMPTY_REPLY.to_string()
                    } else {
                        STOREFRONT_EMPTY_REPLY.to_string()
                    };
                }

                let Routed { response, chart, landing_page, .. } =
                    attach_artifacts(&self.agent, input, response);
                if chart.is_some() {
                    self.chart = chart;
                }
                if landing_page.is_some() {
                    self.landing_page = landing_page;
                }
                self.transcript
                    .push(Message::assistant(response.text).with_actions(response.actions));
                SendOutcome::Replied
            }
            Err(error) => {
                tracing::warn!(
                    event_name = "agent.session.query_failed",
                    agent_id = %self.agent,
                    error_class = error.error_class(),
                    error = %error,
                    "agent query failed"
                );
                let message =
                    if self.is_admin() { error.user_message() } else { GENERIC_ERROR_MESSAGE };
                self.transcript.push(Message::assistant(message));
                SendOutcome::Failed(error)
            }
        }
    }
}
