//! Normalized catalog domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gearloft_core::{ProductId, VariationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable option of a product (e.g. a storage size).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Variation identifier, unique within the catalog.
    pub id: VariationId,
    /// Display label, e.g. `"256GB"`.
    pub label: String,
    /// Price of this variation.
    pub price: Decimal,
    /// Units in stock for this variation.
    pub stock: u32,
}

/// A catalog product, fully normalized at the ingestion boundary.
///
/// Immutable from the cart's perspective: the cart embeds snapshots of
/// the fields it needs at add time and never reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label, e.g. `"Electronics"`.
    pub category: String,
    /// Price when the product has no variations; fallback otherwise.
    pub base_price: Decimal,
    /// Stock when the product has no variations; fallback otherwise.
    pub base_stock: u32,
    /// Average rating in `0.0..=5.0`.
    pub rating: f64,
    /// Image URLs, in display order.
    pub images: Vec<String>,
    /// Attribute name to display string.
    pub specs: BTreeMap<String, String>,
    /// Long-form description.
    pub description: String,
    /// Whether the product is priced and stocked per variation.
    pub has_variations: bool,
    /// Purchasable variations; empty when `has_variations` is false.
    pub variations: Vec<Variation>,
    /// Creation timestamp, used by the `newest` sort.
    pub created_at: DateTime<Utc>,
}

/// The price span a product covers across its variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Cheapest purchasable price.
    pub min: Decimal,
    /// Most expensive purchasable price.
    pub max: Decimal,
}

impl Product {
    /// The `[min, max]` price span over this product's variations, or the
    /// base price twice when it has none.
    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        if self.has_variations && !self.variations.is_empty() {
            let mut min = Decimal::MAX;
            let mut max = Decimal::MIN;
            for variation in &self.variations {
                min = min.min(variation.price);
                max = max.max(variation.price);
            }
            PriceRange { min, max }
        } else {
            PriceRange {
                min: self.base_price,
                max: self.base_price,
            }
        }
    }

    /// Look up a variation by id.
    #[must_use]
    pub fn variation(&self, id: VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;

    /// A product without variations.
    pub fn simple_product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Electronics".to_string(),
            base_price: price,
            base_stock: 10,
            rating: 4.2,
            images: vec!["https://cdn.example.com/p.jpg".to_string()],
            specs: BTreeMap::new(),
            description: String::new(),
            has_variations: false,
            variations: Vec::new(),
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    /// A product with two variations.
    pub fn varied_product(id: i64, prices: &[Decimal]) -> Product {
        let variations = prices
            .iter()
            .enumerate()
            .map(|(i, price)| Variation {
                id: gearloft_core::VariationId::new(id * 100 + i64::try_from(i).unwrap_or(0)),
                label: format!("Option {i}"),
                price: *price,
                stock: 5,
            })
            .collect();
        Product {
            has_variations: true,
            variations,
            ..simple_product(id, Decimal::ZERO)
        }
    }
}
