//! Core types for Gearloft.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod order;
pub mod stock;

pub use email::{Email, EmailError};
pub use id::*;
pub use order::{PaymentMethod, ShippingMethod};
