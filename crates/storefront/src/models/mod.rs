//! Domain models for storefront.
//!
//! Cart and catalog types live in `ttp_core`; this module only holds what the
//! storefront keeps in the session.

pub mod session;

pub use session::keys as session_keys;
