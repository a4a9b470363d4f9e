use serde::{Deserialize, Serialize};

use crate::charts::{chart_for_agent, ChartPayload};
use crate::domain::agent::{AgentId, AgentTier};
use crate::landing::generate_landing_page;
use crate::routing::actions::{render_with_sentinels, Action};
use crate::routing::matcher::{match_variant, Variant};
use crate::routing::templates::render;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub source: String,
    pub title: String,
    pub index: u32,
}

/// Retrieved context document. The mock router never produces any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub content: String,
    pub metadata: SourceMetadata,
    pub relevance_score: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "response")]
    pub text: String,
    #[serde(rename = "agent")]
    pub agent_id: AgentId,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Response {
    pub fn new(agent_id: AgentId, text: impl Into<String>) -> Self {
        Self { text: text.into(), agent_id, sources: Vec::new(), actions: Vec::new() }
    }

    /// Text with the legacy bracketed action blocks appended.
    pub fn text_with_sentinels(&self) -> String {
        render_with_sentinels(&self.text, &self.actions)
    }
}

/// A response together with the artifacts the admin dashboard shows beside it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Routed {
    pub variant: Variant,
    pub response: Response,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
}

/// Picks the canned reply for `agent`. Total: unknown agents get the generic fallback.
pub fn route(agent: &AgentId, query: &str) -> Response {
    let variant = match_variant(agent, query);
    tracing::debug!(
        event_name = "routing.variant.selected",
        agent_id = %agent,
        variant = ?variant,
        "response variant selected"
    );
    Response::new(agent.clone(), render(variant, agent, query))
}

pub fn route_with_artifacts(agent: &AgentId, query: &str) -> Routed {
    attach_artifacts(agent, query, route(agent, query))
}

/// Adds chart and landing page artifacts to a reply, whichever client produced it.
///
/// Admin agents always get a chart. The landing page agent also gets an HTML preview when
/// its reply talks about a "landing page".
pub fn attach_artifacts(agent: &AgentId, query: &str, mut response: Response) -> Routed {
    let mut landing_page = None;
    if *agent == AgentId::LandingPageGenerator && response.text.contains("landing page") {
        match generate_landing_page(query) {
            Ok(html) => {
                response.actions.extend([Action::PreviewLandingPage, Action::GenerateHtml]);
                landing_page = Some(html);
            }
            Err(error) => tracing::warn!(
                event_name = "routing.landing_page.failed",
                agent_id = %agent,
                error = %error,
                "landing page preview skipped"
            ),
        }
    }

    let mut chart = None;
    if agent.tier() == Some(AgentTier::Backend) {
        response.actions.extend([Action::ViewChart, Action::DownloadData]);
        chart = Some(chart_for_agent(agent, query));
    }

    Routed { variant: match_variant(agent, query), response, chart, landing_page }
}
