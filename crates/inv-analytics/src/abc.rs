//! ABC classification by share of inventory value

use std::fmt;

use inv_core::Product;
use inv_query::Record;
use serde::Serialize;
use tracing::debug;

use crate::policy::AnalyticsPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbcEntry<'a> {
    pub product: &'a Product,
    pub value: f64,
    /// Running share of total value up to and including this product, in percent
    pub cumulative_percentage: f64,
    pub class: AbcClass,
}

impl Record for AbcEntry<'_> {
    type Id = String;

    fn id(&self) -> String {
        self.product.id.clone()
    }
}

/// Classify with the default 70 % / 90 % boundaries
pub fn abc_classification(products: &[Product]) -> Vec<AbcEntry<'_>> {
    abc_classification_with(products, &AnalyticsPolicy::default())
}

/// Rank products by stock value and classify them by cumulative share
///
/// Entries come back sorted by value, highest first; equal values keep input
/// order. A collection worth nothing in total is entirely class C.
pub fn abc_classification_with<'a>(products: &'a [Product], policy: &AnalyticsPolicy) -> Vec<AbcEntry<'a>> {
    let mut ranked: Vec<(&Product, f64)> = products
        .iter()
        .map(|product| (product, product.stock_value()))
        .collect();
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let total: f64 = ranked.iter().map(|(_, value)| value).sum();
    let mut running = 0.0;

    let entries: Vec<AbcEntry<'a>> = ranked
        .into_iter()
        .map(|(product, value)| {
            running += value;
            let cumulative_percentage = if total == 0.0 { 100.0 } else { running * 100.0 / total };
            let class = if cumulative_percentage <= policy.abc_a_threshold {
                AbcClass::A
            } else if cumulative_percentage <= policy.abc_b_threshold {
                AbcClass::B
            } else {
                AbcClass::C
            };
            AbcEntry {
                product,
                value,
                cumulative_percentage,
                class,
            }
        })
        .collect();

    debug!(products = entries.len(), total, "abc classification");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::tests::product;
    use proptest::prelude::*;

    #[test]
    fn test_classes() {
        // values 700, 200, 60, 40
        let products = vec![
            product("c1", 6.0, 0.0, 10.0, 10.0),
            product("a", 7.0, 0.0, 10.0, 100.0),
            product("b", 2.0, 0.0, 10.0, 100.0),
            product("c2", 4.0, 0.0, 10.0, 10.0),
        ];
        let entries = abc_classification(&products);
        let got: Vec<(&str, AbcClass)> = entries
            .iter()
            .map(|entry| (entry.product.id.as_str(), entry.class))
            .collect();
        assert_eq!(
            got,
            vec![("a", AbcClass::A), ("b", AbcClass::B), ("c1", AbcClass::C), ("c2", AbcClass::C)]
        );
        assert_eq!(entries[0].cumulative_percentage, 70.0);
        assert_eq!(entries[1].cumulative_percentage, 90.0);
        assert_eq!(entries[3].cumulative_percentage, 100.0);
    }

    #[test]
    fn test_custom_policy() {
        let products = vec![
            product("a", 7.0, 0.0, 10.0, 100.0),
            product("b", 3.0, 0.0, 10.0, 100.0),
        ];
        let policy = AnalyticsPolicy {
            abc_a_threshold: 50.0,
            abc_b_threshold: 80.0,
            ..AnalyticsPolicy::default()
        };
        let classes: Vec<AbcClass> = abc_classification_with(&products, &policy)
            .iter()
            .map(|entry| entry.class)
            .collect();
        assert_eq!(classes, vec![AbcClass::B, AbcClass::C]);
    }

    #[test]
    fn test_zero_value_collection() {
        let products = vec![product("a", 0.0, 0.0, 10.0, 5.0), product("b", 3.0, 0.0, 10.0, 0.0)];
        let entries = abc_classification(&products);
        assert!(entries.iter().all(|entry| entry.class == AbcClass::C));
        assert!(entries.iter().all(|entry| entry.cumulative_percentage == 100.0));
        assert!(abc_classification(&[]).is_empty());
    }

    #[test]
    fn test_equal_values_keep_input_order() {
        let products = vec![
            product("x", 1.0, 0.0, 10.0, 10.0),
            product("y", 2.0, 0.0, 10.0, 5.0),
        ];
        let ids: Vec<&str> = abc_classification(&products)
            .iter()
            .map(|entry| entry.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    proptest! {
        #[test]
        fn cumulative_share_is_monotonic(
            stock in proptest::collection::vec((0u32..500, 1u32..5000), 1..40)
        ) {
            let products: Vec<Product> = stock
                .iter()
                .enumerate()
                .map(|(i, (qty, cost))| product(&format!("p{i}"), *qty as f64, 0.0, 1000.0, *cost as f64))
                .collect();
            let entries = abc_classification(&products);

            prop_assert_eq!(entries.len(), products.len());
            for pair in entries.windows(2) {
                prop_assert!(pair[0].cumulative_percentage <= pair[1].cumulative_percentage + 1e-9);
                prop_assert!(pair[0].class <= pair[1].class);
            }
            let last = entries.last().map(|entry| entry.cumulative_percentage).unwrap_or(0.0);
            prop_assert!((last - 100.0).abs() < 1e-6);
        }
    }
}
