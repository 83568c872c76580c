//! Core value types for the storefront.
//!
//! This module provides type-safe wrappers for product identifiers and prices.

pub mod id;
pub mod price;

pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, CurrencyCodeError, Price, format_amount, format_decimal};
