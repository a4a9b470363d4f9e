use crate::domain::agent::AgentId;
use crate::routing::matcher::Variant;

macro_rules! response {
    ($name:literal) => {
        include_str!(concat!("../../templates/responses/", $name, ".md"))
    };
}

fn template(variant: Variant) -> Option<&'static str> {
    let text = match variant {
        Variant::FatBurningStack => response!("rachel_fat_burning_stack"),
        Variant::LeanMuscleStack => response!("rachel_lean_muscle_stack"),
        Variant::PerformanceStack => response!("rachel_performance_stack"),
        Variant::WomensWellnessStack => response!("rachel_womens_wellness_stack"),
        Variant::EliteCompleteStack => response!("rachel_elite_complete_stack"),
        Variant::StackCatalog => response!("rachel_stack_catalog"),
        Variant::DinnerIdeas => response!("rachel_dinner_ideas"),
        Variant::BreakfastIdeas => response!("rachel_breakfast_ideas"),
        Variant::NutritionGreeting => response!("rachel_greeting"),
        Variant::MuscleBuildingSearch => response!("search_muscle_building"),
        Variant::FatLossSearch => response!("search_fat_loss"),
        Variant::SearchWelcome => response!("search_welcome"),
        Variant::OrderStatus => response!("service_order_status"),
        Variant::Returns => response!("service_returns"),
        Variant::ServiceWelcome => response!("service_welcome"),
        Variant::LifestyleCoaching => response!("ramy_lifestyle"),
        Variant::ReviewInsights => response!("review_synthesis"),
        Variant::QuarterComparison => response!("financial_quarter_comparison"),
        Variant::FinancialDashboard => response!("financial_dashboard"),
        Variant::WomenOver40Page => response!("landing_women_over_40"),
        Variant::LandingGenerator => response!("landing_generator"),
        Variant::ProductInsights => response!("product_analytics"),
        Variant::SalesInsights => response!("sales_optimizer"),
        Variant::ExperienceInsights => response!("customer_experience"),
        Variant::Fallback => return None,
    };
    Some(text.trim_end_matches('\n'))
}

/// Markdown body for `variant`. Only the fallback interpolates the agent and query.
pub fn render(variant: Variant, agent: &AgentId, query: &str) -> String {
    match template(variant) {
        Some(text) => text.to_string(),
        None => fallback(agent.as_str(), query),
    }
}

fn fallback(agent: &str, query: &str) -> String {
    format!(
        "Hello! I'm your {} assistant! \n\nI'm here to help you with all your questions. \
         Based on your query \"{query}\", I'd be happy to provide personalized recommendations \
         and guidance.\n\nWhat specific information are you looking for today? 😊",
        display_name(agent)
    )
}

/// Turns an agent id into a display title: the first underscore becomes a space and every
/// character that starts a word is upper-cased. Later underscores count as word characters,
/// so `a_b_c` becomes `A B_c`.
pub fn display_name(agent: &str) -> String {
    let spaced = agent.replacen('_', " ", 1);
    let mut title = String::with_capacity(spaced.len());
    let mut previous_is_word = false;
    for ch in spaced.chars() {
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if is_word && !previous_is_word {
            title.push(ch.to_ascii_uppercase());
        } else {
            title.push(ch);
        }
        previous_is_word = is_word;
    }
    title
}

#[cfg(test)]
mod tests {
    use super::{display_name, render};
    use crate::domain::agent::AgentId;
    use crate::routing::matcher::Variant;

    #[test]
    fn fat_burning_stack_mentions_price() {
        let text = render(Variant::FatBurningStack, &AgentId::RachelNutrition, "");
        assert!(text.starts_with("🔥 **FAT BURNING STACK** - $108 (Save $8!)"));
        assert!(text.ends_with("body recomposition goals! 🔥"));
    }

    #[test]
    fn order_status_echoes_order_number() {
        let text = render(Variant::OrderStatus, &AgentId::CustomerService, "");
        assert!(text.contains("Order #1439221"));
        assert!(text.contains("SHIPPED"));
    }

    #[test]
    fn every_template_is_non_empty_without_trailing_newline() {
        for variant in [
            Variant::FatBurningStack,
            Variant::LeanMuscleStack,
            Variant::PerformanceStack,
            Variant::WomensWellnessStack,
            Variant::EliteCompleteStack,
            Variant::StackCatalog,
            Variant::DinnerIdeas,
            Variant::BreakfastIdeas,
            Variant::NutritionGreeting,
            Variant::MuscleBuildingSearch,
            Variant::FatLossSearch,
            Variant::SearchWelcome,
            Variant::OrderStatus,
            Variant::Returns,
            Variant::ServiceWelcome,
            Variant::LifestyleCoaching,
            Variant::ReviewInsights,
            Variant::QuarterComparison,
            Variant::FinancialDashboard,
            Variant::WomenOver40Page,
            Variant::LandingGenerator,
            Variant::ProductInsights,
            Variant::SalesInsights,
            Variant::ExperienceInsights,
            Variant::Fallback,
        ] {
            let text = render(variant, &AgentId::RamyLifestyle, "query");
            assert!(!text.is_empty(), "{variant:?}");
            assert!(!text.ends_with('\n'), "{variant:?}");
        }
    }

    #[test]
    fn fallback_interpolates_title_and_query() {
        let text = render(Variant::Fallback, &AgentId::parse("marketing_analytics"), "grow sales");
        assert_eq!(
            text,
            "Hello! I'm your Marketing Analytics assistant! \n\nI'm here to help you with all your \
             questions. Based on your query \"grow sales\", I'd be happy to provide personalized \
             recommendations and guidance.\n\nWhat specific information are you looking for \
             today? 😊"
        );
    }

    #[test]
    fn display_name_replaces_only_first_underscore() {
        assert_eq!(display_name("campaign_optimizer"), "Campaign Optimizer");
        assert_eq!(display_name("client_acquisition_bot"), "Client Acquisition_bot");
        assert_eq!(display_name("seo"), "Seo");
        assert_eq!(display_name("2fast furious"), "2fast Furious");
        assert_eq!(display_name(""), "");
    }
}
