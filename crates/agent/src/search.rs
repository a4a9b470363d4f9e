use nutrafuel_core::domain::agent::AgentId;
use nutrafuel_core::domain::product::Product;
use rand::Rng;
use serde::Serialize;

use crate::client::{AgentClient, AgentQuery};

/// Retrieval depth for storefront search.
pub const SEARCH_RETRIEVAL_K: u32 = 5;
/// Products shown under the recommendation.
pub const SEARCH_PRODUCT_LIMIT: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResult {
    AiRecommendation { title: String, description: String, relevance: u8 },
    Product {
        #[serde(flatten)]
        product: Product,
        relevance: u8,
    },
    Error { title: String, description: String, relevance: u8 },
}

impl SearchResult {
    pub fn relevance(&self) -> u8 {
        match self {
            Self::AiRecommendation { relevance, .. }
            | Self::Product { relevance, .. }
            | Self::Error { relevance, .. } => *relevance,
        }
    }

    fn search_error() -> Self {
        Self::Error {
            title: "Search Error".to_string(),
            description: "Sorry, we encountered an error. Please try again.".to_string(),
            relevance: 0,
        }
    }
}

/// Asks the search agent about `query` and lists the agent's answer above the first few
/// visible products. Product relevance is a display score in `70..=99`.
pub async fn intelligent_search(
    client: &dyn AgentClient,
    query: &str,
    products: &[Product],
) -> Vec<SearchResult> {
    let request =
        AgentQuery::new(AgentId::IntelligentSearch, query).with_k(SEARCH_RETRIEVAL_K);
    let response = match client.query(&request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(
                event_name = "agent.search.failed",
                error_class = error.error_class(),
                error = %error,
                "intelligent search failed"
            );
            return vec![SearchResult::search_error()];
        }
    };

    let mut rng = rand::thread_rng();
    let mut results = Vec::with_capacity(SEARCH_PRODUCT_LIMIT + 1);
    results.push(SearchResult::AiRecommendation {
        title: "AI Recommendation".to_string(),
        description: response.text,
        relevance: 100,
    });
    results.extend(products.iter().take(SEARCH_PRODUCT_LIMIT).map(|product| {
        SearchResult::Product { product: product.clone(), relevance: rng.gen_range(70..=99) }
    }));
    results
}
