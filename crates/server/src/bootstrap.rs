use std::sync::Arc;

use axum::Router;
use nutrafuel_agent::{AgentClient, MockAgentClient};
use nutrafuel_core::catalog::Catalog;
use nutrafuel_core::config::AppConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{self, ApiState};
use crate::health;

pub struct Application {
    pub config: AppConfig,
    pub state: ApiState,
}

pub fn bootstrap_with_config(config: AppConfig) -> Application {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    let client: Arc<dyn AgentClient> = if config.server.simulate_latency {
        Arc::new(MockAgentClient::from_config(&config.mock))
    } else {
        Arc::new(MockAgentClient::instant())
    };
    info!(
        event_name = "system.bootstrap.agents_ready",
        correlation_id = "bootstrap",
        simulate_latency = config.server.simulate_latency,
        "mock agent router ready"
    );

    let state = ApiState { client, catalog: Arc::new(Catalog::storefront()) };
    Application { config, state }
}

impl Application {
    pub fn router(&self) -> Router {
        let router = api::router(self.state.clone())
            .merge(health::router(self.config.backend.api_key_set()))
            .layer(TraceLayer::new_for_http());
        if self.config.server.cors_permissive {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }
}
