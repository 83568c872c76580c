//! Session-backed cart store.
//!
//! The session holds one serialized [`Cart`] snapshot. Each operation loads
//! the snapshot, applies a [`CartAction`] and writes the new snapshot back, so
//! a request only ever sees a complete cart.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use ttp_core::{Cart, CartAction};

use crate::error::AppError;
use crate::models::session_keys;

/// Cart store for the current visitor's session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(store: CartStore) -> Result<String> {
///     let cart = store.dispatch(CartAction::Add(id)).await?;
///     Ok(cart.total_item_count().to_string())
/// }
/// ```
#[derive(Clone)]
pub struct CartStore {
    session: Session,
}

impl CartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Current cart snapshot, empty if the session has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(&self) -> Result<Cart, tower_sessions::session::Error> {
        Ok(self
            .session
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default())
    }

    /// Apply `action` and persist the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn dispatch(&self, action: CartAction) -> Result<Cart, tower_sessions::session::Error> {
        let cart = self.load().await?.apply(action);
        self.session.insert(session_keys::CART, &cart).await?;
        Ok(cart)
    }
}

impl<S> FromRequestParts<S> for CartStore
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        Ok(Self::new(session))
    }
}
