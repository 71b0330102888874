//! Checkout: order totals, payment validation, and order placement.
//!
//! `place_order` is the single submission path: it validates payment
//! input, computes totals from the live cart, persists an immutable
//! [`OrderSnapshot`] for the confirmation view, and clears the cart. A
//! validation failure creates nothing and leaves the cart untouched.

mod card;

pub use card::{CardErrors, CardField, CardInput, luhn_valid, validate_card};

use chrono::{DateTime, NaiveDate, Utc};
use gearloft_core::{Email, PaymentMethod, ShippingMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::cart::{CartLineItem, CartStore};
use crate::storage::{Storage, StorageError, keys};

/// Flat cash-on-delivery surcharge.
fn cod_fee() -> Decimal {
    Decimal::new(50, 0)
}

/// Tax rate applied to the subtotal.
fn tax_rate() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

/// Flat shipping cost for a method.
fn shipping_cost(method: ShippingMethod) -> Decimal {
    match method {
        ShippingMethod::Standard => Decimal::new(10, 0),
        ShippingMethod::Express => Decimal::new(20, 0),
    }
}

/// Order cost breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of price x quantity over the cart.
    pub subtotal: Decimal,
    /// Flat shipping cost.
    pub shipping: Decimal,
    /// Tax on the subtotal.
    pub tax: Decimal,
    /// Cash-on-delivery surcharge; zero for other payment methods.
    pub cod_fee: Decimal,
    /// Grand total, inclusive of the COD surcharge.
    pub total: Decimal,
}

impl OrderTotals {
    /// Compute the breakdown for a subtotal and the chosen methods.
    #[must_use]
    pub fn compute(subtotal: Decimal, shipping: ShippingMethod, payment: PaymentMethod) -> Self {
        let shipping = shipping_cost(shipping);
        let tax = subtotal * tax_rate();
        let cod_fee = match payment {
            PaymentMethod::CashOnDelivery => cod_fee(),
            PaymentMethod::CreditCard => Decimal::ZERO,
        };
        Self {
            subtotal,
            shipping,
            tax,
            cod_fee,
            total: subtotal + shipping + tax + cod_fee,
        }
    }
}

/// Customer contact details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number, free-form.
    pub phone: String,
}

/// Shipping address collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Street address.
    pub street: String,
    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub zip: String,
}

/// Everything the checkout form submits.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Contact email.
    pub email: Email,
    /// Customer contact details.
    pub customer: CustomerInfo,
    /// Shipping address.
    pub address: ShippingAddress,
    /// Chosen shipping method.
    pub shipping_method: ShippingMethod,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Card input; required when paying by credit card.
    pub card: Option<CardInput>,
}

/// Immutable record of a submitted order, written once at checkout and
/// read back by the confirmation view. Never reconciled with a backend -
/// there isn't one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// The cart contents at submission time.
    pub items: Vec<CartLineItem>,
    /// Subtotal over `items`.
    pub subtotal: Decimal,
    /// Flat shipping cost.
    pub shipping: Decimal,
    /// Tax on the subtotal.
    pub tax: Decimal,
    /// Cash-on-delivery surcharge; zero for other payment methods.
    pub cod_fee: Decimal,
    /// Grand total, inclusive of the COD surcharge.
    pub total: Decimal,
    /// Contact email.
    pub email: Email,
    /// Customer contact details.
    pub customer: CustomerInfo,
    /// Shipping address.
    pub shipping_address: ShippingAddress,
    /// Chosen shipping method.
    pub shipping_method: ShippingMethod,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// Submission timestamp.
    pub placed_at: DateTime<Utc>,
}

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was submitted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Credit-card payment was chosen but no card details were supplied.
    #[error("payment method requires card details")]
    MissingCard,

    /// Card validation failed; no order was created.
    #[error("invalid card details: {0}")]
    InvalidCard(CardErrors),

    /// The order snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The order snapshot could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Place an order from the current cart.
///
/// Validates card input when paying by credit card (against `today`),
/// computes totals, persists the snapshot under [`keys::LAST_ORDER`],
/// clears the cart, and returns the snapshot. On any failure nothing is
/// written and the cart is left as-is.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] when the cart has no line items.
/// - [`CheckoutError::MissingCard`] / [`CheckoutError::InvalidCard`] for
///   payment-input problems; `InvalidCard` carries every failed field in
///   order, first one for focus.
/// - [`CheckoutError::Serialize`] / [`CheckoutError::Storage`] when the
///   snapshot cannot be written.
pub fn place_order(
    cart: &mut CartStore,
    storage: &dyn Storage,
    request: &CheckoutRequest,
    today: NaiveDate,
) -> Result<OrderSnapshot, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if request.payment_method == PaymentMethod::CreditCard {
        let card = request.card.as_ref().ok_or(CheckoutError::MissingCard)?;
        let errors = validate_card(card, today);
        if !errors.is_empty() {
            warn!(failed_fields = errors.len(), "card validation failed");
            return Err(CheckoutError::InvalidCard(errors));
        }
    }

    let totals = OrderTotals::compute(cart.total(), request.shipping_method, request.payment_method);
    let snapshot = OrderSnapshot {
        items: cart.items().to_vec(),
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        cod_fee: totals.cod_fee,
        total: totals.total,
        email: request.email.clone(),
        customer: request.customer.clone(),
        shipping_address: request.address.clone(),
        shipping_method: request.shipping_method,
        payment_method: request.payment_method,
        placed_at: Utc::now(),
    };

    storage.set(keys::LAST_ORDER, &serde_json::to_string(&snapshot)?)?;
    cart.clear();
    info!(total = %snapshot.total, items = snapshot.items.len(), "order placed");

    Ok(snapshot)
}

/// Read back the last order snapshot for the confirmation view.
///
/// Returns `None` when no order was placed or the stored snapshot is
/// unreadable.
#[must_use]
pub fn last_order(storage: &dyn Storage) -> Option<OrderSnapshot> {
    match storage.get(keys::LAST_ORDER) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "stored order snapshot is unreadable");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "failed to read stored order snapshot");
            None
        }
    }
}
