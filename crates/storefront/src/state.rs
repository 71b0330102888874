//! Application state shared across the view layer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::storage::{FileStorage, Storage, StorageError};

/// Application state shared across the whole session.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client, the durable storage handle, and the cart store. The
/// cart is the only mutable piece; it sits behind a mutex because it is
/// the sole mutator of its own state and readers always see
/// post-mutation state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    storage: Arc<dyn Storage>,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create the application state with file-backed storage under the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.data_dir)?);
        Ok(Self::with_storage(config, storage))
    }

    /// Create the application state over an explicit storage backend.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn Storage>) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let cart = Mutex::new(CartStore::load(storage.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                storage,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the durable storage backend.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.inner.storage.as_ref()
    }

    /// Lock and return the cart store.
    ///
    /// A poisoned lock is recovered rather than propagated - the cart's
    /// invariants hold after every mutation, so the state is usable even
    /// if a panic unwound through a holder.
    #[must_use]
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::CatalogConfig;
    use crate::storage::MemoryStorage;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            catalog: CatalogConfig {
                base_url: "https://api.example.com".to_string(),
                api_key: None,
                timeout: Duration::from_secs(10),
            },
            data_dir: std::path::PathBuf::from("./data"),
        }
    }

    #[test]
    fn test_state_shares_cart_across_clones() {
        let state = AppState::with_storage(test_config(), Arc::new(MemoryStorage::new()));
        let clone = state.clone();

        assert!(state.cart().is_empty());
        assert!(clone.cart().is_empty());
    }
}
