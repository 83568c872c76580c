//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;
use ttp_core::{CurrencyCode, Product, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::LayoutView;
use crate::services::CartStore;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    /// The id percent-encoded for use as a URL path segment or query value.
    pub path_id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub size: String,
    pub delight_level: String,
    pub ingredients: Vec<String>,
    /// Units of this product already in the visitor's cart.
    pub in_cart: u32,
    /// Page the add-to-cart form returns to.
    pub return_to: String,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, currency: CurrencyCode, in_cart: u32) -> Self {
        let path_id = encode_path_id(&product.id);
        Self {
            id: product.id.to_string(),
            return_to: format!("/products/{path_id}"),
            path_id,
            name: product.name.clone(),
            price: product.unit_price(currency).display(),
            image: product.image.clone(),
            description: product.description.clone(),
            size: product.size.clone(),
            delight_level: product.delight_level.clone(),
            ingredients: product.ingredients.clone(),
            in_cart,
        }
    }

    /// Send the add-to-cart form back to `path` instead of the detail page.
    #[must_use]
    pub fn returning_to(mut self, path: impl Into<String>) -> Self {
        self.return_to = path.into();
        self
    }
}

/// Percent-encode an id so it survives as a single path segment.
#[must_use]
pub fn encode_path_id(id: &ProductId) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: LayoutView,
    pub product: ProductView,
}

/// Quick view fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductView,
}

fn find<'a>(state: &'a AppState, id: &str) -> Result<&'a Product> {
    state
        .catalog()
        .get(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Display product detail page.
#[instrument(skip(state, store))]
pub async fn show(
    State(state): State<AppState>,
    store: CartStore,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let cart = store.load().await?;
    let product = find(&state, &id)?;

    Ok(ProductShowTemplate {
        layout: LayoutView::new(&state, &cart),
        product: ProductView::new(product, state.currency(), cart.quantity_of(&product.id)),
    })
}

/// Display the quick view as a bare fragment for embedding by API clients.
///
/// The catalog page renders the same partial as a modal via `/?view={id}`.
#[instrument(skip(state, store))]
pub async fn quick_view(
    State(state): State<AppState>,
    store: CartStore,
    Path(id): Path<String>,
) -> Result<QuickViewTemplate> {
    let cart = store.load().await?;
    let product = find(&state, &id)?;

    Ok(QuickViewTemplate {
        product: ProductView::new(product, state.currency(), cart.quantity_of(&product.id)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Gift Box",
            "price": "150.00",
        }))
        .unwrap()
    }

    #[test]
    fn test_reserved_characters_are_encoded_in_links() {
        let view = ProductView::new(&product("gift/box?x#y"), CurrencyCode::GHS, 0);

        assert_eq!(view.id, "gift/box?x#y");
        assert_eq!(view.path_id, "gift%2Fbox%3Fx%23y");
        assert_eq!(view.return_to, "/products/gift%2Fbox%3Fx%23y");
    }

    #[test]
    fn test_plain_ids_are_left_readable() {
        let view = ProductView::new(&product("oreo-delight"), CurrencyCode::GHS, 2);

        assert_eq!(view.path_id, "oreo-delight");
        assert_eq!(view.return_to, "/products/oreo-delight");
    }

    #[test]
    fn test_return_target_can_be_overridden() {
        let view = ProductView::new(&product("oreo-delight"), CurrencyCode::GHS, 0)
            .returning_to("/?view=oreo-delight");

        assert_eq!(view.return_to, "/?view=oreo-delight");
    }
}
