use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a business agent.
///
/// Known ids map to dedicated variants; anything else is carried verbatim in `Other`
/// and answered with the generic fallback template.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentId {
    IntelligentSearch,
    CustomerService,
    RachelNutrition,
    RamyLifestyle,
    CustomerExperience,
    ProductAnalytics,
    SalesOptimizer,
    ReviewSynthesis,
    FinancialReports,
    LandingPageGenerator,
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentTier {
    /// Customer-facing storefront agents.
    Frontend,
    /// Admin/internal dashboard agents.
    Backend,
}

static FRONTEND_AGENTS: [AgentId; 4] = [
    AgentId::IntelligentSearch,
    AgentId::CustomerService,
    AgentId::RachelNutrition,
    AgentId::RamyLifestyle,
];

static BACKEND_AGENTS: [AgentId; 6] = [
    AgentId::CustomerExperience,
    AgentId::ProductAnalytics,
    AgentId::SalesOptimizer,
    AgentId::ReviewSynthesis,
    AgentId::FinancialReports,
    AgentId::LandingPageGenerator,
];

impl AgentId {
    pub fn parse(value: &str) -> Self {
        match value {
            "intelligent_search" => Self::IntelligentSearch,
            "customer_service" => Self::CustomerService,
            "rachel_nutrition" => Self::RachelNutrition,
            "ramy_lifestyle" => Self::RamyLifestyle,
            "customer_experience" => Self::CustomerExperience,
            "product_analytics" => Self::ProductAnalytics,
            "sales_optimizer" => Self::SalesOptimizer,
            "review_synthesis" => Self::ReviewSynthesis,
            "financial_reports" => Self::FinancialReports,
            "landing_page_generator" => Self::LandingPageGenerator,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::IntelligentSearch => "intelligent_search",
            Self::CustomerService => "customer_service",
            Self::RachelNutrition => "rachel_nutrition",
            Self::RamyLifestyle => "ramy_lifestyle",
            Self::CustomerExperience => "customer_experience",
            Self::ProductAnalytics => "product_analytics",
            Self::SalesOptimizer => "sales_optimizer",
            Self::ReviewSynthesis => "review_synthesis",
            Self::FinancialReports => "financial_reports",
            Self::LandingPageGenerator => "landing_page_generator",
            Self::Other(raw) => raw,
        }
    }

    /// `None` for ids outside the known directory.
    pub fn tier(&self) -> Option<AgentTier> {
        match self {
            Self::IntelligentSearch
            | Self::CustomerService
            | Self::RachelNutrition
            | Self::RamyLifestyle => Some(AgentTier::Frontend),
            Self::CustomerExperience
            | Self::ProductAnalytics
            | Self::SalesOptimizer
            | Self::ReviewSynthesis
            | Self::FinancialReports
            | Self::LandingPageGenerator => Some(AgentTier::Backend),
            Self::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.tier().is_some()
    }

    pub fn all_known() -> impl Iterator<Item = AgentId> {
        FRONTEND_AGENTS.iter().chain(BACKEND_AGENTS.iter()).cloned()
    }
}

impl From<String> for AgentId {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<AgentId> for String {
    fn from(value: AgentId) -> Self {
        match value {
            AgentId::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AgentTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }

    pub fn agents(&self) -> &'static [AgentId] {
        match self {
            Self::Frontend => &FRONTEND_AGENTS,
            Self::Backend => &BACKEND_AGENTS,
        }
    }
}

/// Directory entry describing how an agent is presented and queried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentProfile {
    pub id: AgentId,
    pub name: &'static str,
    pub description: &'static str,
    pub tier: AgentTier,
    pub category: &'static str,
    pub loading_message: &'static str,
    pub sample_queries: &'static [&'static str],
    /// Number of context documents requested from the retrieval backend.
    pub retrieval_k: u32,
}

const DEFAULT_LOADING_MESSAGE: &str = "Processing your request...";

impl AgentProfile {
    pub fn lookup(id: &AgentId) -> Option<Self> {
        let profile = match id {
            AgentId::IntelligentSearch => Self {
                id: id.clone(),
                name: "Intelligent Search",
                description: "AI-powered product search and recommendations",
                tier: AgentTier::Frontend,
                category: "Search",
                loading_message: DEFAULT_LOADING_MESSAGE,
                sample_queries: &[
                    "Help me build lean muscle",
                    "A stack to burn fat but keep muscle",
                    "Best supplements for strength training",
                ],
                retrieval_k: 5,
            },
            AgentId::CustomerService => Self {
                id: id.clone(),
                name: "Customer Service",
                description: "Order tracking, returns, and customer support",
                tier: AgentTier::Frontend,
                category: "Support",
                loading_message: DEFAULT_LOADING_MESSAGE,
                sample_queries: &["Where is order 1439221?", "How do I return a product?"],
                retrieval_k: 3,
            },
            AgentId::RachelNutrition => Self {
                id: id.clone(),
                name: "Rachel - Nutrition Coach",
                description: "Meal planning and nutrition guidance",
                tier: AgentTier::Frontend,
                category: "Nutrition",
                loading_message: DEFAULT_LOADING_MESSAGE,
                sample_queries: &[
                    "What should I make for dinner for muscle building?",
                    "I need a quick post-workout meal",
                    "Help me meal prep for the week",
                ],
                retrieval_k: 3,
            },
            AgentId::RamyLifestyle => Self {
                id: id.clone(),
                name: "Ramy - Lifestyle Coach",
                description: "Style and lifestyle advice",
                tier: AgentTier::Frontend,
                category: "Lifestyle",
                loading_message: DEFAULT_LOADING_MESSAGE,
                sample_queries: &[
                    "Help me build a morning routine",
                    "What should I wear to feel confident?",
                    "How do I stay motivated?",
                ],
                retrieval_k: 3,
            },
            AgentId::CustomerExperience => Self {
                id: id.clone(),
                name: "Customer Experience Agent",
                description: "Advanced customer analytics and optimization",
                tier: AgentTier::Backend,
                category: "Customer",
                loading_message: "Analyzing customer data (15s max)...",
                sample_queries: &[
                    "Show cohort chart",
                    "Q3 retention rates",
                    "Customer satisfaction summary",
                    "Subscription churn analysis",
                    "Generate cohort analysis",
                ],
                retrieval_k: 1,
            },
            AgentId::ProductAnalytics => Self {
                id: id.clone(),
                name: "Product Analytics Agent",
                description: "Deep product performance and market insights",
                tier: AgentTier::Backend,
                category: "Analytics",
                loading_message: "Processing product metrics...",
                sample_queries: &[
                    "Which products are performing best this quarter?",
                    "What are the latest supplement trends?",
                    "Show me customer performance data",
                ],
                retrieval_k: 1,
            },
            AgentId::SalesOptimizer => Self {
                id: id.clone(),
                name: "Sales Optimizer Agent",
                description: "Revenue optimization and pricing strategies",
                tier: AgentTier::Backend,
                category: "Sales",
                loading_message: "Optimizing sales strategy...",
                sample_queries: &[
                    "Which bundles perform best?",
                    "How should we price new products?",
                    "What's our subscription retention rate?",
                ],
                retrieval_k: 1,
            },
            AgentId::ReviewSynthesis => Self {
                id: id.clone(),
                name: "Review Synthesis Engine",
                description: "Customer review analysis and insights",
                tier: AgentTier::Backend,
                category: "Reviews",
                loading_message: "Synthesizing customer reviews...",
                sample_queries: &[
                    "Summarize customer reviews for Whey Protein",
                    "What are customers saying about our service?",
                    "Show me sentiment analysis for this month",
                ],
                retrieval_k: 1,
            },
            AgentId::FinancialReports => Self {
                id: id.clone(),
                name: "Financial Report Generator",
                description: "Financial analysis and reporting",
                tier: AgentTier::Backend,
                category: "Finance",
                loading_message: "Generating financial analysis...",
                sample_queries: &[
                    "How did Q2 compare to Q1 for subscriptions?",
                    "Generate revenue analysis for this quarter",
                    "Show me profitability by product line",
                ],
                retrieval_k: 1,
            },
            AgentId::LandingPageGenerator => Self {
                id: id.clone(),
                name: "Landing Page Generator",
                description: "Dynamic marketing page creation",
                tier: AgentTier::Backend,
                category: "Marketing",
                loading_message: "Creating landing page...",
                sample_queries: &[
                    "Build a landing page for our best-selling collagen powder for women over 40",
                    "Create a New Year transformation campaign",
                    "Generate a muscle building stack page",
                ],
                retrieval_k: 1,
            },
            AgentId::Other(_) => return None,
        };
        Some(profile)
    }

    pub fn for_tier(tier: AgentTier) -> Vec<Self> {
        tier.agents().iter().filter_map(Self::lookup).collect()
    }

    /// Opening message shown when a chat with this agent starts.
    pub fn greeting(&self) -> String {
        match self.tier {
            AgentTier::Backend => format!(
                "Hello! I'm the {}. I specialize in {}. How can I help you analyze and optimize your business today?",
                self.name,
                self.description.to_lowercase()
            ),
            AgentTier::Frontend => format!("Hi! I'm {}. How can I help you today?", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentId, AgentProfile, AgentTier};

    #[test]
    fn known_ids_round_trip_through_strings() {
        for id in AgentId::all_known() {
            assert_eq!(AgentId::parse(id.as_str()), id);
        }
    }

    #[test]
    fn unknown_ids_are_preserved_verbatim() {
        let id = AgentId::parse("mystery_agent");
        assert_eq!(id, AgentId::Other("mystery_agent".to_string()));
        assert_eq!(id.as_str(), "mystery_agent");
        assert_eq!(id.tier(), None);
        assert!(AgentProfile::lookup(&id).is_none());
    }

    #[test]
    fn ids_are_case_sensitive() {
        assert!(matches!(AgentId::parse("Rachel_Nutrition"), AgentId::Other(_)));
    }

    #[test]
    fn every_known_agent_has_a_profile_in_its_tier() {
        for tier in [AgentTier::Frontend, AgentTier::Backend] {
            let profiles = AgentProfile::for_tier(tier);
            assert_eq!(profiles.len(), tier.agents().len());
            assert!(profiles.iter().all(|profile| profile.tier == tier));
        }
    }

    #[test]
    fn backend_greeting_lowercases_description() {
        let profile = AgentProfile::lookup(&AgentId::FinancialReports).expect("profile");
        assert_eq!(
            profile.greeting(),
            "Hello! I'm the Financial Report Generator. I specialize in financial analysis and reporting. How can I help you analyze and optimize your business today?"
        );
    }

    #[test]
    fn agent_id_serializes_as_plain_string() {
        let encoded = serde_json::to_string(&AgentId::SalesOptimizer).expect("encode");
        assert_eq!(encoded, "\"sales_optimizer\"");

        let decoded: AgentId = serde_json::from_str("\"whatever\"").expect("decode");
        assert_eq!(decoded, AgentId::Other("whatever".to_string()));
    }
}
