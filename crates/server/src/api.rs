//! Agent API routes.
//!
//! - `GET  /`                          service summary
//! - `GET  /agents/frontend`           storefront agent directory
//! - `GET  /agents/backend`            admin agent directory
//! - `POST /query/frontend`            query a storefront agent
//! - `POST /query/backend`             query an admin agent
//! - `POST /query`                     legacy, storefront first then admin
//! - `GET  /charts/{agent}`            chart payload for an admin agent
//! - `GET  /charts/{agent}/export`     chart payload as a JSON attachment
//! - `POST /landing-page`              landing page preview (HTML)
//! - `GET  /products`                  storefront catalog with optional filters

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response as HttpResponse},
    routing::{get, post},
    Json, Router,
};
use nutrafuel_agent::{AgentClient, AgentQuery};
use nutrafuel_core::catalog::{Catalog, ALL_CATEGORIES};
use nutrafuel_core::charts::{chart_for_agent, export_filename, export_json, ChartPayload};
use nutrafuel_core::domain::agent::{AgentId, AgentProfile, AgentTier};
use nutrafuel_core::domain::product::Product;
use nutrafuel_core::errors::{ApplicationError, InterfaceError};
use nutrafuel_core::landing::generate_landing_page;
use nutrafuel_core::routing::Response;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ApiState {
    pub client: Arc<dyn AgentClient>,
    pub catalog: Arc<Catalog>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub agent: String,
    #[serde(default = "default_k")]
    pub k: u32,
}

fn default_k() -> u32 {
    3
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub frontend_agents: Vec<String>,
    pub backend_agents: Vec<String>,
    pub docs: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AgentSummary {
    pub id: String,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AgentsResponse {
    pub agents: Vec<AgentSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LandingRequest {
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/agents/frontend", get(frontend_agents))
        .route("/agents/backend", get(backend_agents))
        .route("/query/frontend", post(query_frontend))
        .route("/query/backend", post(query_backend))
        .route("/query", post(query_legacy))
        .route("/charts/{agent}", get(chart))
        .route("/charts/{agent}/export", get(export_chart))
        .route("/landing-page", post(landing_page))
        .route("/products", get(products))
        .with_state(state)
}

async fn root() -> Json<RootResponse> {
    let ids = |tier: AgentTier| tier.agents().iter().map(AgentId::to_string).collect();
    Json(RootResponse {
        message: "NutraFuel AI API v2.0",
        frontend_agents: ids(AgentTier::Frontend),
        backend_agents: ids(AgentTier::Backend),
        docs: "/docs",
    })
}

fn directory(tier: AgentTier) -> Json<AgentsResponse> {
    let agents = AgentProfile::for_tier(tier)
        .into_iter()
        .map(|profile| AgentSummary {
            id: profile.id.to_string(),
            name: profile.name,
            description: profile.description,
        })
        .collect();
    Json(AgentsResponse { agents })
}

async fn frontend_agents() -> Json<AgentsResponse> {
    directory(AgentTier::Frontend)
}

async fn backend_agents() -> Json<AgentsResponse> {
    directory(AgentTier::Backend)
}

async fn query_frontend(
    State(state): State<ApiState>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<Json<Response>> {
    let agent = require_tier(&request.agent, Some(AgentTier::Frontend))?;
    Ok(Json(process_agent_query(&state, agent, request).await))
}

async fn query_backend(
    State(state): State<ApiState>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<Json<Response>> {
    let agent = require_tier(&request.agent, Some(AgentTier::Backend))?;
    Ok(Json(process_agent_query(&state, agent, request).await))
}

async fn query_legacy(
    State(state): State<ApiState>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<Json<Response>> {
    let agent = require_tier(&request.agent, None)?;
    Ok(Json(process_agent_query(&state, agent, request).await))
}

/// Resolves `raw` to a known agent. With `tier` set, agents of the other tier are rejected.
fn require_tier(raw: &str, tier: Option<AgentTier>) -> ApiResult<AgentId> {
    let agent = AgentId::parse(raw);
    let accepted = match (agent.tier(), tier) {
        (Some(actual), Some(expected)) => actual == expected,
        (Some(_), None) => true,
        (None, _) => false,
    };
    if accepted {
        return Ok(agent);
    }

    let error = ApplicationError::UnknownAgent { agent: raw.to_string(), tier };
    Err(reject(error))
}

fn reject(error: ApplicationError) -> (StatusCode, Json<ApiError>) {
    let interface = error.into_interface(Uuid::new_v4().to_string());
    warn!(
        event_name = "api.request.rejected",
        correlation_id = interface.correlation_id(),
        error = %interface,
        "request rejected"
    );
    to_http(&interface)
}

fn to_http(error: &InterfaceError) -> (StatusCode, Json<ApiError>) {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiError { detail: error.detail() }))
}

async fn process_agent_query(state: &ApiState, agent: AgentId, request: QueryRequest) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let query = AgentQuery::new(agent.clone(), request.query).with_k(request.k);

    match state.client.query(&query).await {
        Ok(response) => {
            info!(
                event_name = "api.query.answered",
                correlation_id = %correlation_id,
                agent_id = %agent,
                "agent query answered"
            );
            response
        }
        Err(error) => {
            warn!(
                event_name = "api.query.degraded",
                correlation_id = %correlation_id,
                agent_id = %agent,
                error = %error,
                "agent query failed, returning fallback"
            );
            Response::new(
                agent.clone(),
                format!(
                    "I'm temporarily experiencing high demand. As your {agent} assistant, I'm \
                     here to help! Please try your question again in a moment, and I'll \
                     provide you with a detailed response."
                ),
            )
        }
    }
}

fn admin_chart(raw: &str, query: &ChartQuery) -> ApiResult<ChartPayload> {
    let agent = require_tier(raw, Some(AgentTier::Backend))?;
    Ok(chart_for_agent(&agent, query.query.as_deref().unwrap_or_default()))
}

async fn chart(
    Path(agent): Path<String>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<ChartPayload>> {
    admin_chart(&agent, &query).map(Json)
}

async fn export_chart(
    Path(agent): Path<String>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<HttpResponse> {
    let payload = admin_chart(&agent, &query)?;
    let body = export_json(&payload)
        .map_err(|error| reject(ApplicationError::Rendering(error.to_string())))?;
    let disposition = format!("attachment; filename=\"{}\"", export_filename(&payload));

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn landing_page(Json(request): Json<LandingRequest>) -> ApiResult<Html<String>> {
    generate_landing_page(&request.query)
        .map(Html)
        .map_err(|error| reject(ApplicationError::Rendering(error.to_string())))
}

async fn products(
    State(state): State<ApiState>,
    Query(query): Query<ProductQuery>,
) -> Json<ProductsResponse> {
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let search = query.search.as_deref().unwrap_or_default();
    let products = state.catalog.filter(category, search).into_iter().cloned().collect();
    Json(ProductsResponse { products })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use nutrafuel_agent::{AgentClient, AgentQuery, MockAgentClient, QueryError};
    use nutrafuel_core::catalog::Catalog;
    use nutrafuel_core::routing::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::{router, ApiState};

    fn app() -> Router {
        router(ApiState {
            client: Arc::new(MockAgentClient::instant()),
            catalog: Arc::new(Catalog::storefront()),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.expect("router response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).expect("request");
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    async fn post_json(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");
        let (status, body) = send(app, request).await;
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[tokio::test]
    async fn root_lists_agents_by_tier() {
        let (status, body) = get_json(app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "NutraFuel AI API v2.0");
        assert_eq!(body["frontend_agents"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["backend_agents"][0], "customer_experience");
        assert_eq!(body["docs"], "/docs");
    }

    #[tokio::test]
    async fn backend_directory_names_agents() {
        let (status, body) = get_json(app(), "/agents/backend").await;

        assert_eq!(status, StatusCode::OK);
        let agents = body["agents"].as_array().expect("agents");
        assert_eq!(agents.len(), 6);
        assert_eq!(agents[4]["id"], "financial_reports");
        assert_eq!(agents[4]["name"], "Financial Report Generator");
        assert_eq!(agents[4]["description"], "Financial analysis and reporting");
    }

    #[tokio::test]
    async fn frontend_query_returns_routed_reply() {
        let payload = json!({"query": "where is order #1439221", "agent": "customer_service"});
        let (status, body) = post_json(app(), "/query/frontend", payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agent"], "customer_service");
        assert!(body["response"].as_str().expect("text").contains("SHIPPED"));
        assert_eq!(body["sources"], json!([]));
    }

    #[tokio::test]
    async fn wrong_tier_is_not_found_with_detail() {
        let payload = json!({"query": "trends", "agent": "product_analytics"});
        let (status, body) = post_json(app(), "/query/frontend", payload).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Frontend agent 'product_analytics' not found");

        let payload = json!({"query": "hi", "agent": "rachel_nutrition"});
        let (status, body) = post_json(app(), "/query/backend", payload).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Backend agent 'rachel_nutrition' not found");
    }

    #[tokio::test]
    async fn legacy_query_accepts_either_tier() {
        let payload = json!({"query": "bundle ideas", "agent": "sales_optimizer", "k": 1});
        let (status, body) = post_json(app(), "/query", payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agent"], "sales_optimizer");

        let payload = json!({"query": "hi", "agent": "campaign_optimizer"});
        let (status, body) = post_json(app(), "/query", payload).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Agent 'campaign_optimizer' not found");
    }

    struct DownClient;

    #[async_trait]
    impl AgentClient for DownClient {
        async fn query(&self, _request: &AgentQuery) -> Result<Response, QueryError> {
            Err(QueryError::Transport("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn failing_agent_degrades_to_fallback_reply() {
        let app = router(ApiState {
            client: Arc::new(DownClient),
            catalog: Arc::new(Catalog::storefront()),
        });
        let payload = json!({"query": "hi", "agent": "ramy_lifestyle"});
        let (status, body) = post_json(app, "/query/frontend", payload).await;

        assert_eq!(status, StatusCode::OK);
        let text = body["response"].as_str().expect("text");
        assert!(text.starts_with("I'm temporarily experiencing high demand."));
        assert!(text.contains("As your ramy_lifestyle assistant"));
    }

    #[tokio::test]
    async fn chart_endpoint_returns_cohort_payload() {
        let (status, body) =
            get_json(app(), "/charts/customer_experience?query=q3%20cohorts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "cohort");
        assert_eq!(body["title"], "Q3 2025 Subscription Cohort Analysis");
        assert_eq!(body["data"]["cohorts"].as_array().map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn chart_for_storefront_agent_is_not_found() {
        let (status, body) = get_json(app(), "/charts/rachel_nutrition").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Backend agent 'rachel_nutrition' not found");
    }

    #[tokio::test]
    async fn chart_export_is_an_attachment() {
        let request = Request::get("/charts/customer_experience/export?query=cohort")
            .body(Body::empty())
            .expect("request");
        let response = app().oneshot(request).await.expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("content disposition");
        assert_eq!(
            disposition,
            "attachment; filename=\"Q3_2025_Subscription_Cohort_Analysis_data.json\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let text = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(text.contains("\n  \"type\": \"cohort\""));
    }

    #[tokio::test]
    async fn landing_page_renders_html() {
        let request = Request::post("/landing-page")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"query": "protein launch"}).to_string()))
            .expect("request");
        let response = app().oneshot(request).await.expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let html = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(html.contains("Elite Whey Isolate"));
    }

    #[tokio::test]
    async fn products_filter_by_category_and_search() {
        let (status, body) = get_json(app(), "/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"].as_array().map(Vec::len), Some(8));

        let (_, body) = get_json(app(), "/products?category=Recovery").await;
        let products = body["products"].as_array().expect("products");
        assert!(!products.is_empty());
        assert!(products.iter().all(|product| product["category"] == "Recovery"));

        let (_, body) = get_json(app(), "/products?search=zzz-not-a-product").await;
        assert_eq!(body["products"], json!([]));
    }
}
