//! Persistent shopping-cart store.
//!
//! The cart is a list of line items, uniquely keyed by
//! `(product, variation)`, loaded from durable storage once at
//! construction and re-persisted after every mutation. Stock limits are
//! enforced here: a mutation that would exceed the resolving stock is
//! rejected whole, with a warning, and leaves state untouched.
//!
//! Persistence is fire-and-forget - a failed write logs an error and the
//! in-memory state stays authoritative for the rest of the session.

use std::collections::BTreeMap;
use std::sync::Arc;

use gearloft_core::{ProductId, VariationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Product, Variation};
use crate::storage::{Storage, keys};

/// One purchasable entry in the cart.
///
/// Snapshots the product fields the views need, so cart rendering never
/// needs a catalog round trip. `price` is resolved at add time and is
/// never re-derived - later catalog price changes do not retroactively
/// alter cart totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Unit price resolved at add time (variation price or base price).
    pub price: Decimal,
    /// Units of this line in the cart; always `1..=stock_limit()`.
    pub quantity: u32,
    /// The chosen variation snapshot, if any.
    pub variation: Option<Variation>,
    /// Product image URLs.
    pub images: Vec<String>,
    /// Product specs.
    pub specs: BTreeMap<String, String>,
    /// Product base price (fallback pricing).
    pub base_price: Decimal,
    /// Product base stock (fallback stock limit).
    pub base_stock: u32,
    /// Whether the product is priced per variation.
    pub has_variations: bool,
    /// Product description.
    pub description: String,
}

impl CartLineItem {
    /// The identity this line is keyed by.
    #[must_use]
    pub fn identity(&self) -> (ProductId, Option<VariationId>) {
        (self.id, self.variation.as_ref().map(|v| v.id))
    }

    /// The stock limit resolving this line: the variation's stock, or the
    /// product's base stock when no variation was chosen.
    #[must_use]
    pub fn stock_limit(&self) -> u32 {
        self.variation.as_ref().map_or(self.base_stock, |v| v.stock)
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The cart store: sole owner and mutator of the line-item list.
pub struct CartStore {
    items: Vec<CartLineItem>,
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Load the cart from storage.
    ///
    /// A missing, unreadable, or corrupt `cart` document degrades to an
    /// empty cart with a warning; starting a session is never fatal.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let items = match storage.get(keys::CART) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "stored cart is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        Self { items, storage }
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of price x quantity over all line items; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Add a product to the cart.
    ///
    /// Resolves pricing and stock from the chosen variation when
    /// `variation_id` is given, else from the product's base fields. The
    /// mutation is rejected (warning, no state change) when the quantity
    /// is zero, the variation id is unknown, or the resulting quantity
    /// would exceed the resolving stock. When a line with the same
    /// identity exists, its quantity is incremented instead of adding a
    /// duplicate line - and the increment is all-or-nothing.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32, variation_id: Option<VariationId>) {
        if quantity == 0 {
            warn!(product = %product.id, "rejected add of zero quantity");
            return;
        }

        let variation = match variation_id {
            Some(id) => match product.variation(id) {
                Some(v) => Some(v.clone()),
                None => {
                    warn!(product = %product.id, variation = %id, "unknown variation, add rejected");
                    return;
                }
            },
            None => None,
        };

        let price = variation.as_ref().map_or(product.base_price, |v| v.price);
        let stock = variation.as_ref().map_or(product.base_stock, |v| v.stock);

        if quantity > stock {
            warn!(
                product = %product.id,
                quantity,
                stock,
                "requested quantity exceeds available stock"
            );
            return;
        }

        if let Some(existing) = self.find_mut(product.id, variation_id) {
            let merged = existing.quantity + quantity;
            if merged > existing.stock_limit() {
                warn!(
                    product = %product.id,
                    merged,
                    stock = existing.stock_limit(),
                    "merged quantity exceeds available stock"
                );
                return;
            }
            existing.quantity = merged;
            self.persist();
            return;
        }

        self.items.push(CartLineItem {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price,
            quantity,
            variation,
            images: product.images.clone(),
            specs: product.specs.clone(),
            base_price: product.base_price,
            base_stock: product.base_stock,
            has_variations: product.has_variations,
            description: product.description.clone(),
        });
        self.persist();
    }

    /// Remove the line matching `(product_id, variation_id)`; a no-op
    /// when no such line exists.
    pub fn remove_from_cart(&mut self, product_id: ProductId, variation_id: Option<VariationId>) {
        let before = self.items.len();
        self.items
            .retain(|item| item.identity() != (product_id, variation_id));
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Set the quantity of an existing line directly.
    ///
    /// Rejected (warning, no state change) when the quantity is zero or
    /// exceeds the line's resolving stock; a no-op when the line is
    /// absent.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        variation_id: Option<VariationId>,
    ) {
        let Some(item) = self.find_mut(product_id, variation_id) else {
            return;
        };

        if quantity == 0 {
            warn!(product = %product_id, "rejected quantity update below 1");
            return;
        }

        if quantity > item.stock_limit() {
            warn!(
                product = %product_id,
                quantity,
                stock = item.stock_limit(),
                "requested quantity exceeds available stock"
            );
            return;
        }

        item.quantity = quantity;
        self.persist();
    }

    /// Empty the cart (used after checkout).
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn find_mut(
        &mut self,
        product_id: ProductId,
        variation_id: Option<VariationId>,
    ) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|item| item.identity() == (product_id, variation_id))
    }

    /// Re-persist the full line-item list. Failures are logged and
    /// swallowed; in-memory state stays authoritative.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(keys::CART, &json) {
            tracing::error!(error = %e, "failed to persist cart");
        }
    }
}
