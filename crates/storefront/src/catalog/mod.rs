//! Catalog collaborator client and client-side query layer.
//!
//! # Architecture
//!
//! - The catalog service is the source of truth - no local sync, direct
//!   REST calls via [`CatalogClient`]
//! - Responses are normalized once at the ingestion boundary ([`raw`]):
//!   numeric fields that arrive as strings, JSON-encoded `specs`/`images`
//!   and 0/1 boolean flags all become plain typed fields on [`Product`]
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//! - Filtering, sorting and pagination run client-side over the full
//!   catalog snapshot ([`query`])
//!
//! # Example
//!
//! ```rust,ignore
//! use gearloft_storefront::catalog::{CatalogClient, query};
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! let products = client.get_all_products().await?;
//! let filter = query::ProductFilter::default();
//! let listing = query::apply(&products, &filter, query::SortKey::Popularity);
//! let page = query::paginate(&listing, 1);
//! ```

mod client;
pub mod query;
mod raw;
pub(crate) mod types;

pub use client::CatalogClient;
pub use types::{PriceRange, Product, Variation};

use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
///
/// Every variant is recoverable: the caller surfaces a retry prompt and
/// keeps whatever data it already had.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog service.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Service returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },
}

/// Parse and normalize a raw catalog listing from JSON text.
///
/// Malformed `specs`/`images`/`rating` fields on individual products
/// degrade to empty values rather than failing the listing; see [`raw`].
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the body is not a JSON array of
/// products.
pub fn parse_products(body: &str) -> Result<Vec<Product>, CatalogError> {
    let raw: Vec<raw::RawProduct> = serde_json::from_str(body)?;
    Ok(raw.into_iter().map(raw::RawProduct::normalize).collect())
}
