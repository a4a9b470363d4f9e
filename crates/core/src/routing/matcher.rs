//! Keyword rules that pick a response variant for an agent.
//!
//! Each agent owns an ordered rule table. Rules are evaluated top to bottom against the
//! lowercased query and the first hit wins; when nothing matches the table's default
//! variant is used. Unknown agents get an empty table whose default is the generic
//! fallback.

use serde::Serialize;

use crate::domain::agent::AgentId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    FatBurningStack,
    LeanMuscleStack,
    PerformanceStack,
    WomensWellnessStack,
    EliteCompleteStack,
    StackCatalog,
    DinnerIdeas,
    BreakfastIdeas,
    NutritionGreeting,
    MuscleBuildingSearch,
    FatLossSearch,
    SearchWelcome,
    OrderStatus,
    Returns,
    ServiceWelcome,
    LifestyleCoaching,
    ReviewInsights,
    QuarterComparison,
    FinancialDashboard,
    WomenOver40Page,
    LandingGenerator,
    ProductInsights,
    SalesInsights,
    ExperienceInsights,
    Fallback,
}

#[derive(Debug)]
pub enum Predicate {
    /// Lowercased query contains any of the keywords.
    Any(&'static [&'static str]),
    /// Lowercased query contains the first keyword and any of the rest.
    Both(&'static str, &'static [&'static str]),
    /// Raw query contains the literal, case preserved.
    Literal(&'static str),
    Either(&'static Predicate, &'static Predicate),
}

impl Predicate {
    pub fn matches(&self, raw: &str, lowered: &str) -> bool {
        match self {
            Self::Any(keywords) => keywords.iter().any(|keyword| lowered.contains(keyword)),
            Self::Both(required, keywords) => {
                lowered.contains(required) && keywords.iter().any(|k| lowered.contains(k))
            }
            Self::Literal(literal) => raw.contains(literal),
            Self::Either(left, right) => left.matches(raw, lowered) || right.matches(raw, lowered),
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    pub variant: Variant,
    pub when: Predicate,
}

#[derive(Debug)]
pub struct RuleTable {
    pub rules: &'static [Rule],
    pub default: Variant,
}

impl RuleTable {
    pub fn evaluate(&self, query: &str) -> Variant {
        let lowered = query.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.when.matches(query, &lowered))
            .map(|rule| rule.variant)
            .unwrap_or(self.default)
    }
}

const fn rule(variant: Variant, when: Predicate) -> Rule {
    Rule { variant, when }
}

static NUTRITION_RULES: RuleTable = RuleTable {
    rules: &[
        rule(Variant::FatBurningStack, Predicate::Both("muscle", &["burn", "burning"])),
        rule(Variant::LeanMuscleStack, Predicate::Both("lean", &["muscle"])),
        rule(Variant::PerformanceStack, Predicate::Any(&["performance", "athletic"])),
        rule(Variant::WomensWellnessStack, Predicate::Any(&["women", "wellness"])),
        rule(Variant::EliteCompleteStack, Predicate::Any(&["complete", "elite", "ultimate"])),
        rule(Variant::StackCatalog, Predicate::Any(&["stack", "supplement", "bundle"])),
        rule(Variant::DinnerIdeas, Predicate::Any(&["dinner", "meal", "cook", "recipe"])),
        rule(Variant::BreakfastIdeas, Predicate::Any(&["breakfast", "morning", "pre-workout"])),
    ],
    default: Variant::NutritionGreeting,
};

static SEARCH_RULES: RuleTable = RuleTable {
    rules: &[
        rule(Variant::MuscleBuildingSearch, Predicate::Any(&["muscle", "build", "gain", "bulk"])),
        rule(Variant::FatLossSearch, Predicate::Any(&["fat", "burn", "lose", "cut", "lean"])),
    ],
    default: Variant::SearchWelcome,
};

static SERVICE_RULES: RuleTable = RuleTable {
    rules: &[
        rule(
            Variant::OrderStatus,
            Predicate::Either(&Predicate::Literal("1439221"), &Predicate::Any(&["track"])),
        ),
        rule(Variant::Returns, Predicate::Any(&["return", "refund", "exchange"])),
    ],
    default: Variant::ServiceWelcome,
};

static FINANCIAL_RULES: RuleTable = RuleTable {
    rules: &[rule(Variant::QuarterComparison, Predicate::Any(&["q2", "q1", "quarter", "compare"]))],
    default: Variant::FinancialDashboard,
};

static LANDING_RULES: RuleTable = RuleTable {
    rules: &[rule(Variant::WomenOver40Page, Predicate::Any(&["collagen", "women", "40", "older"]))],
    default: Variant::LandingGenerator,
};

static LIFESTYLE_RULES: RuleTable =
    RuleTable { rules: &[], default: Variant::LifestyleCoaching };
static REVIEW_RULES: RuleTable = RuleTable { rules: &[], default: Variant::ReviewInsights };
static PRODUCT_RULES: RuleTable = RuleTable { rules: &[], default: Variant::ProductInsights };
static SALES_RULES: RuleTable = RuleTable { rules: &[], default: Variant::SalesInsights };
static EXPERIENCE_RULES: RuleTable =
    RuleTable { rules: &[], default: Variant::ExperienceInsights };
static FALLBACK_RULES: RuleTable = RuleTable { rules: &[], default: Variant::Fallback };

pub fn rules_for(agent: &AgentId) -> &'static RuleTable {
    match agent {
        AgentId::RachelNutrition => &NUTRITION_RULES,
        AgentId::IntelligentSearch => &SEARCH_RULES,
        AgentId::CustomerService => &SERVICE_RULES,
        AgentId::RamyLifestyle => &LIFESTYLE_RULES,
        AgentId::ReviewSynthesis => &REVIEW_RULES,
        AgentId::FinancialReports => &FINANCIAL_RULES,
        AgentId::LandingPageGenerator => &LANDING_RULES,
        AgentId::ProductAnalytics => &PRODUCT_RULES,
        AgentId::SalesOptimizer => &SALES_RULES,
        AgentId::CustomerExperience => &EXPERIENCE_RULES,
        AgentId::Other(_) => &FALLBACK_RULES,
    }
}

pub fn match_variant(agent: &AgentId, query: &str) -> Variant {
    rules_for(agent).evaluate(query)
}

#[cfg(test)]
mod tests {
    use super::{match_variant, rules_for, Variant};
    use crate::domain::agent::AgentId;

    fn nutrition(query: &str) -> Variant {
        match_variant(&AgentId::RachelNutrition, query)
    }

    #[test]
    fn nutrition_rules_are_evaluated_in_order() {
        assert_eq!(nutrition("give me a muscle building burn stack"), Variant::FatBurningStack);
        assert_eq!(nutrition("muscle burning"), Variant::FatBurningStack);
        assert_eq!(nutrition("lean muscle please"), Variant::LeanMuscleStack);
        assert_eq!(nutrition("athletic performance"), Variant::PerformanceStack);
        assert_eq!(nutrition("wellness for women"), Variant::WomensWellnessStack);
        assert_eq!(nutrition("the ultimate set"), Variant::EliteCompleteStack);
        assert_eq!(nutrition("show me a bundle"), Variant::StackCatalog);
        assert_eq!(nutrition("what to cook tonight"), Variant::DinnerIdeas);
        assert_eq!(nutrition("morning fuel"), Variant::BreakfastIdeas);
        assert_eq!(nutrition("hello"), Variant::NutritionGreeting);
    }

    #[test]
    fn earlier_rule_shadows_later_rule() {
        // "stack" alone would pick the catalog, "elite" is checked first.
        assert_eq!(nutrition("elite stack"), Variant::EliteCompleteStack);
        // "meal" is a dinner keyword even when "breakfast" is present.
        assert_eq!(nutrition("breakfast meal"), Variant::DinnerIdeas);
        // "pre-workout" is a breakfast keyword but "supplement" wins first.
        assert_eq!(nutrition("pre-workout supplement"), Variant::StackCatalog);
    }

    #[test]
    fn muscle_without_burn_or_lean_is_not_a_stack() {
        assert_eq!(nutrition("muscle"), Variant::NutritionGreeting);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(nutrition("LEAN MUSCLE"), Variant::LeanMuscleStack);
        assert_eq!(
            match_variant(&AgentId::FinancialReports, "Q2 numbers"),
            Variant::QuarterComparison
        );
    }

    #[test]
    fn search_prefers_muscle_over_fat_loss() {
        let agent = AgentId::IntelligentSearch;
        assert_eq!(
            match_variant(&agent, "build muscle and burn fat"),
            Variant::MuscleBuildingSearch
        );
        assert_eq!(match_variant(&agent, "cut for summer"), Variant::FatLossSearch);
        assert_eq!(match_variant(&agent, "what's new"), Variant::SearchWelcome);
    }

    #[test]
    fn customer_service_order_number_is_literal() {
        let agent = AgentId::CustomerService;
        assert_eq!(match_variant(&agent, "where is order 1439221"), Variant::OrderStatus);
        assert_eq!(match_variant(&agent, "TRACK my parcel"), Variant::OrderStatus);
        assert_eq!(match_variant(&agent, "I want a refund"), Variant::Returns);
        assert_eq!(match_variant(&agent, "order 1439222"), Variant::ServiceWelcome);
    }

    #[test]
    fn landing_rules_match_age_keyword() {
        let agent = AgentId::LandingPageGenerator;
        assert_eq!(match_variant(&agent, "page for over 40s"), Variant::WomenOver40Page);
        assert_eq!(match_variant(&agent, "new year campaign"), Variant::LandingGenerator);
    }

    #[test]
    fn single_template_agents_ignore_the_query() {
        for (agent, expected) in [
            (AgentId::RamyLifestyle, Variant::LifestyleCoaching),
            (AgentId::ReviewSynthesis, Variant::ReviewInsights),
            (AgentId::ProductAnalytics, Variant::ProductInsights),
            (AgentId::SalesOptimizer, Variant::SalesInsights),
            (AgentId::CustomerExperience, Variant::ExperienceInsights),
        ] {
            assert!(rules_for(&agent).rules.is_empty());
            assert_eq!(match_variant(&agent, "muscle burn q2 collagen"), expected);
        }
    }

    #[test]
    fn unknown_agent_falls_back() {
        let agent = AgentId::parse("marketing_analytics");
        assert_eq!(match_variant(&agent, "anything"), Variant::Fallback);
    }
}
