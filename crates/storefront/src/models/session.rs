//! Session-related types.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the serialized `ttp_core::Cart` snapshot.
    pub const CART: &str = "cart";
}
