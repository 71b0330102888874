//! Unified error handling for the storefront engine.
//!
//! Subsystem errors converge into a single `AppError` so front ends deal
//! with one type. Nothing here is fatal to the process: every variant
//! maps to a user-facing message and a retryable UI state.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// A message fit for end users: internals stay in the logs, the user
    /// gets the retry prompt the situation calls for.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) | Self::NotFound(_) => {
                "Product not found.".to_string()
            }
            Self::Catalog(_) => "Failed to load products. Please try again later.".to_string(),
            Self::Storage(_) => "Could not access local data.".to_string(),
            Self::Checkout(e) => e.to_string(),
            Self::Config(e) => e.to_string(),
            Self::InvalidInput(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::InvalidInput("bad email".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad email");
    }

    #[test]
    fn test_user_message_hides_transport_details() {
        let err = AppError::Catalog(CatalogError::Api {
            status: 502,
            message: "upstream exploded".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Failed to load products. Please try again later."
        );
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Catalog(CatalogError::NotFound("product 9".to_string()));
        assert_eq!(err.user_message(), "Product not found.");
    }
}
