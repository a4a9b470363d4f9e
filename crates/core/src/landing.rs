//! HTML preview for pages drafted by the landing page agent.

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

const TEMPLATE_NAME: &str = "landing_page.html";

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("landing page template error: {0}")]
    Template(#[from] tera::Error),
}

#[derive(Clone, Debug, Serialize)]
struct Feature {
    icon: &'static str,
    tint: &'static str,
    title: &'static str,
    body: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        icon: "🏆",
        tint: "blue",
        title: "Premium Quality",
        body: "Third-party tested for purity and potency",
    },
    Feature {
        icon: "⚡",
        tint: "green",
        title: "Fast Results",
        body: "See improvements in just 2 weeks",
    },
    Feature {
        icon: "🛡️",
        tint: "purple",
        title: "Money-Back Guarantee",
        body: "30-day satisfaction guarantee",
    },
];

/// Product featured on the page. Matching is case-sensitive.
pub fn featured_product(query: &str) -> &'static str {
    if query.contains("collagen") {
        "Elite Collagen Matrix"
    } else if query.contains("protein") {
        "Elite Whey Isolate"
    } else {
        "APEX Elite Supplement"
    }
}

pub struct LandingPageRenderer {
    templates: Tera,
}

impl LandingPageRenderer {
    pub fn new() -> Result<Self, LandingError> {
        let mut templates = Tera::default();
        templates.add_raw_template(TEMPLATE_NAME, include_str!("../templates/landing_page.html"))?;
        Ok(Self { templates })
    }

    pub fn render(&self, query: &str) -> Result<String, LandingError> {
        let mut context = Context::new();
        context.insert("product_name", featured_product(query));
        context.insert("tagline", "Elite Performance for Next Generation Athletes");
        context.insert("price", "$69.99");
        context.insert("features", &FEATURES);
        let html = self.templates.render(TEMPLATE_NAME, &context)?;
        Ok(html.trim().to_string())
    }
}

pub fn generate_landing_page(query: &str) -> Result<String, LandingError> {
    LandingPageRenderer::new()?.render(query)
}

#[cfg(test)]
mod tests {
    use super::{featured_product, generate_landing_page};

    #[test]
    fn product_choice_follows_keywords_in_order() {
        assert_eq!(featured_product("collagen powder with protein"), "Elite Collagen Matrix");
        assert_eq!(featured_product("a protein page"), "Elite Whey Isolate");
        assert_eq!(featured_product("New Year campaign"), "APEX Elite Supplement");
    }

    #[test]
    fn product_choice_is_case_sensitive() {
        assert_eq!(featured_product("Collagen for women"), "APEX Elite Supplement");
    }

    #[test]
    fn rendered_page_names_the_product() {
        let html = generate_landing_page("landing page for collagen").expect("render");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<title>Elite Collagen Matrix - APEX</title>"));
        assert!(html.contains("Why Choose Elite Collagen Matrix?"));
        assert!(html.contains("Ready to Reach Your APEX?"));
        assert_eq!(html.matches("text-center p-6").count(), 3);
        assert!(html.contains("Order Now - $69.99"));
    }
}
