//! Gearloft Core - Shared types library.
//!
//! This crate provides common types used across all Gearloft components:
//! - `storefront` - the headless storefront engine
//! - `cli` - command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money and stock helpers, emails, and order enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
