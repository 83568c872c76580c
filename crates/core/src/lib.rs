//! T-The-Plug Core - storefront domain library.
//!
//! This crate holds everything the storefront knows about selling cookies:
//! - [`catalog`] - the read-only product list, indexed by id
//! - [`cart`] - the session cart and the operations that change it
//! - [`summary`] - order summaries joining a cart with the catalog
//! - [`checkout`] - order references, the WhatsApp message and deep link
//! - [`types`] - product ids and prices
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no file access, no
//! HTTP, no sessions. The `storefront` and `cli` crates own all I/O.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod summary;
pub mod types;

pub use cart::{Cart, CartAction, CartItem};
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{
    CheckoutRequest, CheckoutSettings, OrderReference, OrderReferenceError, compose_message,
    prepare_checkout, whatsapp_link,
};
pub use summary::{OrderSummary, OrderSummaryLine};
pub use types::*;
