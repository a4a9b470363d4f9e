use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};

pub const ALL_CATEGORIES: &str = "All";

pub const CATEGORIES: [&str; 7] =
    [ALL_CATEGORIES, "Protein", "Pre-Workout", "Performance", "Recovery", "Fat Loss", "Health"];

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The APEX storefront line-up.
    pub fn storefront() -> Self {
        Self::new(vec![
            entry("1", "Elite Whey Isolate", 69, Some(79), "elite-whey-isolate", "Protein")
                .describe("25g ultra-pure whey protein isolate, zero sugar, rapid absorption")
                .rated(4.9, 2847)
                .bestseller()
                .linked("/products/whey-protein"),
            entry("2", "Ignite Pre-Workout", 49, Some(59), "ignite-pre-workout", "Pre-Workout")
                .describe("Clean energy, laser focus, explosive pumps. No crash.")
                .rated(4.8, 1892)
                .bestseller(),
            entry("3", "Creatine HCL Pro", 39, None, "creatine-hcl-pro", "Performance")
                .describe("Superior absorption, strength gains, no bloating")
                .rated(4.9, 1634)
                .new_arrival(),
            entry("4", "Recovery BCAA+", 42, None, "recovery-bcaa-pro", "Recovery")
                .describe("2:1:1 BCAA ratio + electrolytes for optimal recovery")
                .rated(4.7, 978),
            entry("5", "Burn Elite", 59, None, "burn-elite", "Fat Loss")
                .describe("Advanced thermogenic formula, appetite control, energy boost")
                .rated(4.6, 756)
                .new_arrival(),
            entry("6", "Night Recovery Pro", 45, None, "night-recovery-pro", "Recovery")
                .describe("Deep sleep support, muscle recovery, growth hormone optimization")
                .rated(4.8, 567),
            entry("7", "Peak Multivitamin", 35, None, "peak-multivitamin", "Health")
                .describe("Elite athlete formulation, bioavailable nutrients")
                .rated(4.7, 1243),
            entry("8", "Collagen Matrix", 52, None, "collagen-matrix", "Recovery")
                .describe("Type I, II, III collagen for joints, skin, and recovery")
                .rated(4.6, 823),
        ])
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products in `category` (or every category for `All`) whose name or description
    /// contains `search`, ignoring case. An empty search matches everything.
    pub fn filter(&self, category: &str, search: &str) -> Vec<&Product> {
        let needle = search.to_lowercase();
        self.products
            .iter()
            .filter(|product| category == ALL_CATEGORIES || product.category == category)
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

fn entry(
    id: &str,
    name: &str,
    price: i64,
    original_price: Option<i64>,
    slug: &str,
    category: &str,
) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        price: Decimal::from(price),
        original_price: original_price.map(Decimal::from),
        image: format!("/images/{slug}.png"),
        category: category.to_string(),
        description: String::new(),
        rating: 0.0,
        reviews: 0,
        bestseller: false,
        is_new: false,
        link: None,
    }
}

trait ProductExt {
    fn describe(self, description: &str) -> Self;
    fn rated(self, rating: f32, reviews: u32) -> Self;
    fn bestseller(self) -> Self;
    fn new_arrival(self) -> Self;
    fn linked(self, link: &str) -> Self;
}

impl ProductExt for Product {
    fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn rated(mut self, rating: f32, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    fn bestseller(mut self) -> Self {
        self.bestseller = true;
        self
    }

    fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    fn linked(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Catalog, ALL_CATEGORIES, CATEGORIES};
    use crate::domain::product::ProductId;

    fn names(products: Vec<&crate::domain::product::Product>) -> Vec<&str> {
        products.into_iter().map(|product| product.name.as_str()).collect()
    }

    #[test]
    fn storefront_has_eight_products_in_known_categories() {
        let catalog = Catalog::storefront();

        assert_eq!(catalog.products().len(), 8);
        for product in catalog.products() {
            assert!(CATEGORIES.contains(&product.category.as_str()), "{}", product.category);
        }
    }

    #[test]
    fn find_returns_product_with_list_price() {
        let catalog = Catalog::storefront();
        let whey = catalog.find(&ProductId("1".to_string())).expect("whey");

        assert_eq!(whey.name, "Elite Whey Isolate");
        assert_eq!(whey.savings(), Some(Decimal::from(10)));
        assert_eq!(whey.link.as_deref(), Some("/products/whey-protein"));
        assert!(catalog.find(&ProductId("42".to_string())).is_none());
    }

    #[test]
    fn filter_by_category() {
        let catalog = Catalog::storefront();

        assert_eq!(
            names(catalog.filter("Recovery", "")),
            vec!["Recovery BCAA+", "Night Recovery Pro", "Collagen Matrix"]
        );
        assert_eq!(catalog.filter(ALL_CATEGORIES, "").len(), 8);
        assert!(catalog.filter("Snacks", "").is_empty());
    }

    #[test]
    fn filter_search_is_case_insensitive_over_name_and_description() {
        let catalog = Catalog::storefront();

        assert_eq!(names(catalog.filter(ALL_CATEGORIES, "WHEY")), vec!["Elite Whey Isolate"]);
        assert_eq!(
            names(catalog.filter(ALL_CATEGORIES, "muscle recovery")),
            vec!["Night Recovery Pro"]
        );
        assert_eq!(names(catalog.filter("Protein", "crash")), Vec::<&str>::new());
    }
}
