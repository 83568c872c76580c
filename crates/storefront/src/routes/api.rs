//! JSON read API.
//!
//! Read-only views of the catalog and the visitor's cart. Prices and totals
//! are serialized as decimal strings.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use ttp_core::{CartItem, CurrencyCode, OrderSummary, Product};

use crate::error::Result;
use crate::routes::summarize;
use crate::services::CartStore;
use crate::state::AppState;

/// Response body for `GET /api/catalog`.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub currency: CurrencyCode,
    pub products: Vec<Product>,
}

/// Response body for `GET /api/cart`.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    /// Raw cart entries, including ids the catalog no longer knows.
    pub items: Vec<CartItem>,
    /// Sum of quantities over `items`.
    pub item_count: u64,
    pub summary: OrderSummary,
    /// Grand total as shown to the customer, e.g. `GHS 108.00`.
    pub display_total: String,
}

/// List every product in catalog order.
#[instrument(skip(state))]
pub async fn catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        currency: state.currency(),
        products: state.catalog().products().to_vec(),
    })
}

/// Current cart snapshot with its priced summary.
#[instrument(skip(state, store))]
pub async fn cart(State(state): State<AppState>, store: CartStore) -> Result<Json<CartResponse>> {
    let cart = store.load().await?;
    let summary = summarize(&state, &cart);

    Ok(Json(CartResponse {
        items: cart.items().to_vec(),
        item_count: cart.total_item_count(),
        display_total: summary.display_total(),
        summary,
    }))
}
