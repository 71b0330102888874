//! Order placement end to end over file storage.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::NaiveDate;
use gearloft_core::{Email, PaymentMethod, ShippingMethod};
use gearloft_integration_tests::raw_catalog_json;
use gearloft_storefront::cart::CartStore;
use gearloft_storefront::catalog::parse_products;
use gearloft_storefront::checkout::{
    self, CardInput, CheckoutError, CheckoutRequest, CustomerInfo, ShippingAddress,
};
use gearloft_storefront::storage::{FileStorage, Storage, keys};
use rust_decimal::Decimal;

fn request(payment: PaymentMethod, card: Option<CardInput>) -> CheckoutRequest {
    CheckoutRequest {
        email: Email::parse("shopper@example.com").unwrap(),
        customer: CustomerInfo {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            phone: "555-0100".to_string(),
        },
        address: ShippingAddress {
            street: "1 Main St".to_string(),
            apartment: Some("4B".to_string()),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip: "411001".to_string(),
        },
        shipping_method: ShippingMethod::Standard,
        payment_method: payment,
        card,
    }
}

fn valid_card() -> CardInput {
    CardInput {
        number: "4539 5787 6362 1486".to_string(),
        expiry: "12/28".to_string(),
        cvv: "123".to_string(),
        holder_name: "Asha Rao".to_string(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
}

#[test]
fn credit_checkout_persists_snapshot_and_clears_cart() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let catalog = parse_products(raw_catalog_json()).unwrap();

    let mut cart = CartStore::load(storage.clone());
    // 2 x 49.50 = 99.00 subtotal.
    cart.add_to_cart(catalog.get(1).unwrap(), 2, None);

    let snapshot = checkout::place_order(
        &mut cart,
        storage.as_ref(),
        &request(PaymentMethod::CreditCard, Some(valid_card())),
        today(),
    )
    .unwrap();

    // 99 + 10 shipping + 9.90 tax
    assert_eq!(snapshot.subtotal, Decimal::new(9900, 2));
    assert_eq!(snapshot.total, Decimal::new(11890, 2));
    assert!(cart.is_empty());

    // The cleared cart is what a new session sees.
    let reloaded = CartStore::load(storage.clone());
    assert!(reloaded.is_empty());

    // The confirmation view reads the snapshot back from disk.
    let read_back = checkout::last_order(storage.as_ref()).unwrap();
    assert_eq!(read_back, snapshot);
    assert_eq!(read_back.shipping_address.apartment.as_deref(), Some("4B"));
}

#[test]
fn rejected_card_leaves_cart_and_storage_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let catalog = parse_products(raw_catalog_json()).unwrap();

    let mut cart = CartStore::load(storage.clone());
    cart.add_to_cart(catalog.get(1).unwrap(), 1, None);

    let mut card = valid_card();
    card.expiry = "01/20".to_string();

    let result = checkout::place_order(
        &mut cart,
        storage.as_ref(),
        &request(PaymentMethod::CreditCard, Some(card)),
        today(),
    );

    assert!(matches!(result, Err(CheckoutError::InvalidCard(_))));
    assert_eq!(cart.len(), 1);
    assert!(storage.get(keys::LAST_ORDER).unwrap().is_none());
}

#[test]
fn cod_checkout_carries_the_surcharge() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let catalog = parse_products(raw_catalog_json()).unwrap();

    let mut cart = CartStore::load(storage.clone());
    cart.add_to_cart(catalog.get(1).unwrap(), 2, None);

    let snapshot = checkout::place_order(
        &mut cart,
        storage.as_ref(),
        &request(PaymentMethod::CashOnDelivery, None),
        today(),
    )
    .unwrap();

    assert_eq!(snapshot.cod_fee, Decimal::new(50, 0));
    // 99 + 10 + 9.90 + 50
    assert_eq!(snapshot.total, Decimal::new(16890, 2));
}
