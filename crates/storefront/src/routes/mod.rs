//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Catalog page (?view={id} opens the quick-view modal)
//! GET  /health                    - Health check
//!
//! # Products
//! GET  /products/{id}             - Product detail
//! GET  /products/{id}/quick-view  - Quick view fragment
//!
//! # Cart (form posts, answered with 303)
//! GET  /cart                      - Cart page
//! POST /cart/add                  - Add one unit
//! POST /cart/increase             - Increase an existing line
//! POST /cart/decrease             - Decrease, removing at zero
//! POST /cart/remove               - Remove a line
//! POST /cart/clear                - Empty the cart
//! GET  /cart/count                - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout                  - Redirect to the WhatsApp deep link
//!
//! # JSON
//! GET  /api/catalog               - Product list
//! GET  /api/cart                  - Cart snapshot and summary
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use ttp_core::{Cart, OrderSummary};

use crate::middleware::cart_rate_limiter;
use crate::state::AppState;

/// Data every page hands to `base.html`.
#[derive(Clone)]
pub struct LayoutView {
    pub store_name: String,
    pub cart_count: u64,
    pub display_number: String,
    pub contact_link: String,
}

impl LayoutView {
    #[must_use]
    pub fn new(state: &AppState, cart: &Cart) -> Self {
        Self {
            store_name: state.checkout().business_name.clone(),
            cart_count: cart.total_item_count(),
            display_number: state.config().whatsapp.display_number.clone(),
            contact_link: state.checkout().contact_link(),
        }
    }
}

/// Join the cart with the catalog, logging entries that no longer resolve.
pub(crate) fn summarize(state: &AppState, cart: &Cart) -> OrderSummary {
    let summary = OrderSummary::build(cart, state.catalog(), state.currency());

    if summary.lines().len() < cart.len() {
        for item in cart
            .items()
            .iter()
            .filter(|item| !state.catalog().contains(&item.product_id))
        {
            tracing::debug!(product_id = %item.product_id, "Dropping unknown product from summary");
        }
    }

    summary
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
///
/// Only the mutating routes are rate limited.
pub fn cart_routes() -> Router<AppState> {
    let writes = Router::new()
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .layer(cart_rate_limiter());

    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .merge(writes)
}

/// Create the checkout router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout::checkout))
        .layer(cart_rate_limiter())
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(api::catalog))
        .route("/cart", get(api::cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout redirect
        .merge(checkout_routes())
        // JSON API
        .nest("/api", api_routes())
}
