//! Cart route handlers.
//!
//! Every mutation is a plain form post answered with `303 See Other`, so the
//! pages work without JavaScript. Posted ids are never rejected: ids the
//! catalog does not know are stored and then dropped from summaries, and
//! changes to absent lines do nothing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use ttp_core::{CartAction, OrderSummary, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::routes::products::encode_path_id;
use crate::routes::{LayoutView, summarize};
use crate::services::CartStore;
use crate::state::AppState;

/// Where mutations land when `return_to` is absent or rejected.
pub const DEFAULT_RETURN_PATH: &str = "/cart";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: String,
    /// The id percent-encoded for the product link.
    pub path_id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Whether there is anything to check out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&OrderSummary> for CartView {
    fn from(summary: &OrderSummary) -> Self {
        let currency = summary.currency();
        Self {
            lines: summary
                .lines()
                .iter()
                .map(|line| CartLineView {
                    product_id: line.product_id.to_string(),
                    path_id: encode_path_id(&line.product_id),
                    name: line.name.clone(),
                    unit_price: ttp_core::format_amount(line.unit_price, currency),
                    quantity: line.quantity,
                    line_total: ttp_core::format_amount(line.line_total, currency),
                })
                .collect(),
            total: summary.display_total(),
            item_count: summary.item_count(),
        }
    }
}

/// Form data for single-product mutations.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Form data for clearing the cart.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Resolve a `return_to` value to a local path.
///
/// Only paths starting with a single `/` are accepted; anything else,
/// including protocol-relative `//host` URLs, falls back to `/cart`.
#[must_use]
pub fn return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.contains(char::is_control) =>
        {
            path
        }
        _ => DEFAULT_RETURN_PATH,
    }
}

/// Apply a single-product action built from the posted id.
///
/// Ids longer than [`ProductId::MAX_LENGTH`] cannot name a catalog product and
/// are not written to the session; the visitor is redirected as usual.
async fn mutate_item(
    store: &CartStore,
    form: CartItemForm,
    action: fn(ProductId) -> CartAction,
) -> Result<Response> {
    let return_to = form.return_to.as_deref();

    if form.product_id.len() > ProductId::MAX_LENGTH {
        tracing::debug!(
            length = form.product_id.len(),
            "Ignoring cart change for oversized product id"
        );
        return Ok(Redirect::to(return_path(return_to)).into_response());
    }

    mutate(store, action(ProductId::new(form.product_id.as_str())), return_to).await
}

/// Apply `action`, record it and send the browser back.
async fn mutate(store: &CartStore, action: CartAction, return_to: Option<&str>) -> Result<Response> {
    let (message, product_id) = match &action {
        CartAction::Add(id) => ("Added item", Some(id.to_string())),
        CartAction::Increase(id) => ("Increased quantity", Some(id.to_string())),
        CartAction::Decrease(id) => ("Decreased quantity", Some(id.to_string())),
        CartAction::Remove(id) => ("Removed item", Some(id.to_string())),
        CartAction::Clear => ("Cleared cart", None),
    };

    let cart = store.dispatch(action).await?;

    match &product_id {
        Some(id) => add_breadcrumb("cart", message, Some([("product_id", id.as_str())].as_slice())),
        None => add_breadcrumb("cart", message, None),
    }
    tracing::debug!(
        product_id = product_id.as_deref().unwrap_or_default(),
        item_count = cart.total_item_count(),
        "{message}"
    );

    Ok(Redirect::to(return_path(return_to)).into_response())
}

/// Display cart page.
#[instrument(skip(state, store))]
pub async fn show(State(state): State<AppState>, store: CartStore) -> Result<CartShowTemplate> {
    let cart = store.load().await?;
    let summary = summarize(&state, &cart);

    Ok(CartShowTemplate {
        layout: LayoutView::new(&state, &cart),
        cart: CartView::from(&summary),
    })
}

/// Add one unit of a product.
#[instrument(skip(store))]
pub async fn add(store: CartStore, Form(form): Form<CartItemForm>) -> Result<Response> {
    mutate_item(&store, form, CartAction::Add).await
}

/// Increase an existing line by one.
#[instrument(skip(store))]
pub async fn increase(store: CartStore, Form(form): Form<CartItemForm>) -> Result<Response> {
    mutate_item(&store, form, CartAction::Increase).await
}

/// Decrease a line by one, removing it at zero.
#[instrument(skip(store))]
pub async fn decrease(store: CartStore, Form(form): Form<CartItemForm>) -> Result<Response> {
    mutate_item(&store, form, CartAction::Decrease).await
}

/// Remove a line.
#[instrument(skip(store))]
pub async fn remove(store: CartStore, Form(form): Form<CartItemForm>) -> Result<Response> {
    mutate_item(&store, form, CartAction::Remove).await
}

/// Empty the cart.
#[instrument(skip(store))]
pub async fn clear(store: CartStore, Form(form): Form<ClearCartForm>) -> Result<Response> {
    mutate(&store, CartAction::Clear, form.return_to.as_deref()).await
}

/// Get cart count badge fragment.
#[instrument(skip(store))]
pub async fn count(store: CartStore) -> Result<CartCountTemplate> {
    let cart = store.load().await?;
    Ok(CartCountTemplate {
        count: cart.total_item_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_path_accepts_local_paths() {
        assert_eq!(return_path(Some("/")), "/");
        assert_eq!(return_path(Some("/products/oreo-delight")), "/products/oreo-delight");
        assert_eq!(return_path(Some("/?view=gift%2Fbox")), "/?view=gift%2Fbox");
    }

    #[test]
    fn test_return_path_rejects_external_targets() {
        assert_eq!(return_path(None), DEFAULT_RETURN_PATH);
        assert_eq!(return_path(Some("")), DEFAULT_RETURN_PATH);
        assert_eq!(return_path(Some("https://evil.example")), DEFAULT_RETURN_PATH);
        assert_eq!(return_path(Some("//evil.example")), DEFAULT_RETURN_PATH);
        assert_eq!(return_path(Some("/\\evil.example")), DEFAULT_RETURN_PATH);
        assert_eq!(return_path(Some("products")), DEFAULT_RETURN_PATH);
        assert_eq!(return_path(Some("/cart\r\nSet-Cookie: x=1")), DEFAULT_RETURN_PATH);
    }
}
