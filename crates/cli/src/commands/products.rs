use nutrafuel_core::catalog::{Catalog, ALL_CATEGORIES};

use crate::commands::CommandResult;

pub fn run(category: Option<&str>, search: Option<&str>) -> CommandResult {
    let catalog = Catalog::storefront();
    let category = category.unwrap_or(ALL_CATEGORIES);
    let products = catalog.filter(category, search.unwrap_or_default());

    if products.is_empty() {
        return CommandResult::text("no products match");
    }

    let mut lines: Vec<String> = products
        .iter()
        .map(|product| {
            let mut line = format!(
                "{:>2}  {:<22} ${:<7} {:<12} {} ({} reviews)",
                product.id.0,
                product.name,
                product.price,
                product.category,
                product.rating,
                product.reviews
            );
            if let Some(savings) = product.savings() {
                line.push_str(&format!("  save ${savings}"));
            }
            line
        })
        .collect();
    lines.push(format!("{} of {} products", products.len(), catalog.products().len()));
    CommandResult::text(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn lists_whole_catalog_without_filters() {
        let result = run(None, None);

        assert_eq!(result.exit_code, 0);
        assert!(result.output.ends_with("8 of 8 products"));
        assert!(result.output.contains("Elite Whey Isolate"));
        assert!(result.output.contains("save $10"));
    }

    #[test]
    fn category_and_search_narrow_the_list() {
        let result = run(Some("Recovery"), Some("night"));

        assert!(result.output.contains("Night Recovery Pro"));
        assert!(result.output.ends_with("1 of 8 products"));
    }

    #[test]
    fn empty_result_is_reported() {
        let result = run(Some("Protein"), Some("zzz"));

        assert_eq!(result.output, "no products match");
    }
}
