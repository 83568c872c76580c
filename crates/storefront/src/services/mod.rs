//! Business services for the storefront.
//!
//! - [`catalog`] - loads the product catalog file at startup
//! - [`cart_store`] - session-backed cart snapshots

pub mod cart_store;
pub mod catalog;

pub use cart_store::CartStore;
pub use catalog::{CatalogLoadError, load_catalog};
