//! Integration tests for Gearloft.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gearloft-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_ingestion` - duck-typed wire data through the ingestion
//!   boundary and the query layer
//! - `cart_flow` - cart mutations and persistence across sessions
//! - `checkout_flow` - order placement end to end over file storage
//!
//! Everything runs against local fixtures and temporary directories; no
//! network or running service is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

/// A raw catalog listing the way the collaborator serves it: prices and
/// ratings as strings on some rows, `specs`/`images` JSON-encoded on
/// some rows, 0/1 variation flags.
#[must_use]
pub fn raw_catalog_json() -> &'static str {
    r#"[
        {
            "id": 1,
            "name": "Solara Phone",
            "category": "Electronics",
            "base_price": "699.00",
            "base_stock": 25,
            "rating": "4.5",
            "images": "[\"https://cdn.example.com/solara.jpg\"]",
            "specs": "{\"Display\": \"6.1in OLED\", \"Battery\": \"4500mAh\"}",
            "description": "Flagship phone.",
            "has_variations": 1,
            "variations": [
                {"id": 11, "variation": "128GB", "price": "699.00", "stock": 12},
                {"id": 12, "variation": "256GB", "price": "799.00", "stock": 3}
            ],
            "created_at": "2024-05-10 09:30:00"
        },
        {
            "id": 2,
            "name": "Brew Kettle",
            "category": "Home",
            "base_price": 49.5,
            "base_stock": 40,
            "rating": 4.1,
            "images": ["https://cdn.example.com/kettle.jpg"],
            "specs": {"Capacity": "1.7L"},
            "description": "Gooseneck kettle.",
            "has_variations": 0,
            "variations": [],
            "created_at": "2025-01-20 14:00:00"
        },
        {
            "id": 3,
            "name": "Trail Lamp",
            "category": "Electronics",
            "base_price": "29",
            "base_stock": 7,
            "rating": "3.2",
            "images": "not valid json",
            "specs": "{broken",
            "description": "",
            "has_variations": false,
            "created_at": "2023-11-02 08:15:00"
        }
    ]"#
}
