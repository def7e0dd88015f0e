//! Catalog filter pipeline
//!
//! Reduces a catalog by up to three stages applied in fixed order
//! (category, color, price). A stage runs only when its quiz step has a
//! non-empty selection. Every stage is an order-preserving filter, so the
//! result is always a subsequence of the catalog.
//!
//! Per-record problems (missing fields, wrong types) mean "does not match".
//! A catalog that is not a sequence at all is logged and yields no products.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, error, warn};

use crate::catalog::{Catalog, Product};
use crate::error::QuizError;
use crate::quiz::Selections;
use crate::types::FilterStage;

/// Run the whole pipeline against `catalog` with the quiz `selections`.
pub fn filter_catalog(catalog: &Catalog, selections: &Selections) -> Vec<Product> {
    let records = match catalog {
        Catalog::Records(records) => records,
        Catalog::Malformed(kind) => {
            let err = QuizError::malformed_catalog(format!("expected an array, found {kind}"));
            error!(error = %err, "Cannot filter catalog, yielding no products");
            return Vec::new();
        }
    };

    let mut products: Vec<Product> = records.to_vec();
    for stage in FilterStage::in_order() {
        let Some(selection) = selections.get(stage.step()).filter(|s| !s.is_empty()) else {
            continue;
        };
        let before = products.len();
        products = apply_stage(stage, &products, selection);
        debug!(%stage, selection, before, after = products.len(), "Applied filter stage");
    }
    products
}

/// Apply a single stage to `products`.
pub fn apply_stage(stage: FilterStage, products: &[Product], selection: &str) -> Vec<Product> {
    match stage {
        FilterStage::Category => filter_by_category(products, selection),
        FilterStage::Color => filter_by_color(products, selection),
        FilterStage::Price => match selection.parse::<PriceRange>() {
            Ok(range) => filter_by_price(products, &range),
            Err(e) => {
                warn!(selection, error = %e, "Unusable price range, no product matches");
                Vec::new()
            }
        },
    }
}

/// Keep products whose gender contains the token or whose labels include it.
pub fn filter_by_category(products: &[Product], category: &str) -> Vec<Product> {
    let token = category.to_lowercase();
    products
        .iter()
        .filter(|product| matches_category(product, &token))
        .cloned()
        .collect()
}

fn matches_category(product: &Product, token: &str) -> bool {
    let gender_match = product
        .gender
        .as_deref()
        .is_some_and(|gender| gender.to_lowercase().contains(token));
    let label_match = product
        .labels
        .as_deref()
        .is_some_and(|labels| labels.iter().any(|label| label.to_lowercase() == token));
    gender_match || label_match
}

/// Keep products that list the color (case-insensitive exact match).
pub fn filter_by_color(products: &[Product], color: &str) -> Vec<Product> {
    let token = color.to_lowercase();
    products
        .iter()
        .filter(|product| {
            product
                .colors
                .as_deref()
                .is_some_and(|colors| colors.iter().any(|c| c.to_lowercase() == token))
        })
        .cloned()
        .collect()
}

/// Keep products whose price falls inside `range`.
pub fn filter_by_price(products: &[Product], range: &PriceRange) -> Vec<Product> {
    products
        .iter()
        .filter(|product| range.contains(product.price))
        .cloned()
        .collect()
}

/// Inclusive price range parsed from `"min-max"`, `"min-"` or `"-max"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    /// `None` means open-ended
    pub max: Option<f64>,
}

impl PriceRange {
    /// Whether `price` lies in the range. Products without a price never do.
    pub fn contains(&self, price: Option<f64>) -> bool {
        let Some(price) = price else {
            return false;
        };
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl FromStr for PriceRange {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let min_part = parts.next().unwrap_or_default().trim();
        let max_part = parts.next().unwrap_or_default().trim();

        let min = if min_part.is_empty() {
            0.0
        } else {
            min_part
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| QuizError::general(format!("non-numeric minimum price {min_part:?}")))?
        };

        // Empty, zero or unreadable maximum leaves the range open.
        let max = max_part
            .parse::<f64>()
            .ok()
            .filter(|v| *v != 0.0 && !v.is_nan());

        Ok(Self { min, max })
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}-", self.min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> Product {
        Product {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn priced(name: &str, price: f64) -> Product {
        Product {
            price: Some(price),
            ..product(name)
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(Product::display_name).collect()
    }

    #[test]
    fn test_price_range_parse_forms() {
        assert_eq!(
            "200-300".parse::<PriceRange>().unwrap(),
            PriceRange { min: 200.0, max: Some(300.0) }
        );
        assert_eq!(
            "1000-".parse::<PriceRange>().unwrap(),
            PriceRange { min: 1000.0, max: None }
        );
        assert_eq!(
            "-500".parse::<PriceRange>().unwrap(),
            PriceRange { min: 0.0, max: Some(500.0) }
        );
        assert_eq!(
            "750".parse::<PriceRange>().unwrap(),
            PriceRange { min: 750.0, max: None }
        );
        assert_eq!(
            "100-0".parse::<PriceRange>().unwrap(),
            PriceRange { min: 100.0, max: None }
        );
        assert!("cheap-300".parse::<PriceRange>().is_err());
    }

    #[test]
    fn test_price_stage_selects_only_in_range() {
        let products = vec![priced("a", 100.0), priced("b", 250.0), priced("c", 500.0)];
        let range: PriceRange = "200-300".parse().unwrap();
        assert_eq!(names(&filter_by_price(&products, &range)), vec!["b"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let products = vec![priced("low", 200.0), priced("high", 300.0)];
        let range: PriceRange = "200-300".parse().unwrap();
        assert_eq!(filter_by_price(&products, &range).len(), 2);
    }

    #[test]
    fn test_missing_price_is_excluded() {
        let products = vec![product("no price"), priced("priced", 10.0)];
        let range: PriceRange = "0-".parse().unwrap();
        assert_eq!(names(&filter_by_price(&products, &range)), vec!["priced"]);
    }

    #[test]
    fn test_category_matches_gender_substring_or_label() {
        let products = vec![
            Product {
                gender: Some("Men".into()),
                ..product("shirt")
            },
            Product {
                gender: Some("Women".into()),
                ..product("dress")
            },
            Product {
                labels: Some(vec!["MEN".into(), "Sale".into()]),
                ..product("labelled")
            },
            Product {
                labels: Some(vec!["Menswear".into()]),
                ..product("partial label")
            },
            product("bare"),
        ];
        assert_eq!(
            names(&filter_by_category(&products, "men")),
            vec!["shirt", "dress", "labelled"]
        );
    }

    #[test]
    fn test_color_match_is_exact_and_case_insensitive() {
        let products = vec![
            Product {
                colors: Some(vec!["Siyah".into(), "Beyaz".into()]),
                ..product("two-tone")
            },
            Product {
                colors: Some(vec!["Siyahımsı".into()]),
                ..product("near")
            },
            product("colorless"),
        ];
        assert_eq!(names(&filter_by_color(&products, "SIYAH")), vec!["two-tone"]);
    }

    #[test]
    fn test_pipeline_skips_stages_without_selection() {
        let catalog = Catalog::from(vec![priced("a", 100.0), priced("b", 900.0)]);
        let mut selections = Selections::default();
        selections.insert(FilterStage::Price.step(), "500-".to_string());
        assert_eq!(names(&filter_catalog(&catalog, &selections)), vec!["b"]);
    }

    #[test]
    fn test_empty_selection_does_not_filter() {
        let catalog = Catalog::from(vec![product("a"), product("b")]);
        let mut selections = Selections::default();
        selections.insert(FilterStage::Category.step(), String::new());
        assert_eq!(filter_catalog(&catalog, &selections).len(), 2);
    }

    #[test]
    fn test_malformed_catalog_yields_empty() {
        let catalog = Catalog::Malformed("object".to_string());
        assert!(filter_catalog(&catalog, &Selections::default()).is_empty());
    }

    #[test]
    fn test_unusable_price_selection_matches_nothing() {
        let products = vec![priced("a", 1.0)];
        assert!(apply_stage(FilterStage::Price, &products, "abc-def").is_empty());
    }
}
