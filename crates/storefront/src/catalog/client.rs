//! REST client for the external catalog service.
//!
//! Uses `reqwest` for HTTP with an optional API key header. Product
//! listings and per-id lookups are cached using `moka` (5-minute TTL);
//! newsletter subscriptions always go to the network.

use std::sync::Arc;
use std::time::Duration;

use gearloft_core::{Email, ProductId};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;

use super::types::Product;
use super::{CatalogError, parse_products};

/// Cache TTL for catalog responses.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached entries.
const CACHE_CAPACITY: u64 = 1000;

/// How much of an error body to keep in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Arc<Product>),
}

/// Client for the catalog collaborator API.
///
/// Cheaply cloneable; all clones share the same HTTP connection pool and
/// response cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_key: config
                    .api_key
                    .as_ref()
                    .map(|key| key.expose_secret().to_string()),
                timeout: config.timeout,
                cache,
            }),
        }
    }

    /// Execute a GET and return the response body.
    async fn get_text(&self, path: &str) -> Result<String, CatalogError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self.inner.client.get(&url).timeout(self.inner.timeout);
        if let Some(key) = &self.inner.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(body)
    }

    /// Fetch the full catalog.
    ///
    /// Served from cache when a listing was fetched within the last five
    /// minutes.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport, status, or decode failure.
    /// All of them are retryable; the cache keeps no failed entries.
    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("catalog listing served from cache");
            return Ok(products);
        }

        let body = self.get_text("/products").await?;
        let products = Arc::new(parse_products(&body)?);
        debug!(count = products.len(), "catalog listing fetched");

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// The collaborator returns a single-element array; an empty array
    /// maps to [`CatalogError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, or any other
    /// [`CatalogError`] on transport, status, or decode failure.
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Arc<Product>, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!(%id, "product served from cache");
            return Ok(product);
        }

        let body = self.get_text(&format!("/products/{id}")).await?;
        let product = parse_products(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))?;
        let product = Arc::new(product);

        self.inner
            .cache
            .insert(key, CacheValue::Product(product.clone()))
            .await;
        Ok(product)
    }

    /// Subscribe an email address to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport or status failure.
    #[instrument(skip(self, email))]
    pub async fn subscribe_newsletter(&self, email: &Email) -> Result<(), CatalogError> {
        let url = format!("{}/newsletter", self.inner.base_url);

        let mut request = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .json(&serde_json::json!({ "email": email.as_str() }));
        if let Some(key) = &self.inner.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: message.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        debug!("newsletter subscription accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    #[test]
    fn test_base_url_is_normalized() {
        let config = CatalogConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        };
        let client = CatalogClient::new(&config);
        assert_eq!(client.inner.base_url, "https://api.example.com/v1");
    }
}
