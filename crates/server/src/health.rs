use axum::{extract::State, routing::get, Json, Router};
use nutrafuel_core::domain::agent::AgentTier;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    api_key_set: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub api_key_set: bool,
    pub frontend_agents: usize,
    pub backend_agents: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WarmupResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub fn router(api_key_set: bool) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/warmup", get(warmup))
        .with_state(HealthState { api_key_set })
}

pub async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        api_key_set: state.api_key_set,
        frontend_agents: AgentTier::Frontend.agents().len(),
        backend_agents: AgentTier::Backend.agents().len(),
    })
}

/// Cheap request used by the storefront to wake a cold deployment.
pub async fn warmup() -> Json<WarmupResponse> {
    Json(WarmupResponse { status: "warmed", message: "Server is ready" })
}
