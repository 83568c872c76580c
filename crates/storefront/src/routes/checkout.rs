//! Checkout route handler.
//!
//! Checkout hands the order to WhatsApp: the server composes the message,
//! logs the order reference and redirects the browser to the deep link. No
//! order is stored and the cart is left as it was.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;
use ttp_core::prepare_checkout;

use crate::error::{Result, add_breadcrumb};
use crate::routes::summarize;
use crate::routes::cart::DEFAULT_RETURN_PATH;
use crate::services::CartStore;
use crate::state::AppState;

/// Redirect to the WhatsApp deep link for the current cart.
///
/// An empty summary (empty cart, or only unknown products) sends the visitor
/// back to the cart page.
#[instrument(skip(state, store))]
pub async fn checkout(State(state): State<AppState>, store: CartStore) -> Result<Response> {
    let cart = store.load().await?;
    let summary = summarize(&state, &cart);

    let prepared = {
        let mut rng = rand::rng();
        prepare_checkout(&summary, state.checkout(), &mut rng)?
    };

    let Some(request) = prepared else {
        tracing::debug!("Checkout requested with nothing to order");
        return Ok(Redirect::to(DEFAULT_RETURN_PATH).into_response());
    };

    let reference = request.reference.to_string();
    tracing::info!(
        order_reference = %reference,
        item_count = summary.item_count(),
        total = %summary.display_total(),
        "Checkout link generated"
    );
    add_breadcrumb(
        "checkout",
        "Redirected to WhatsApp",
        Some([("order_reference", reference.as_str())].as_slice()),
    );

    Ok(Redirect::to(&request.url).into_response())
}
