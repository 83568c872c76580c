//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;
use ttp_core::ProductId;

use crate::error::Result;
use crate::filters;
use crate::routes::LayoutView;
use crate::routes::products::ProductView;
use crate::services::CartStore;
use crate::state::AppState;

/// Query parameters for the catalog page.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    /// Product to open in the quick-view modal.
    #[serde(default)]
    pub view: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: LayoutView,
    pub products: Vec<ProductView>,
    /// Product shown in the quick-view modal, if one was requested.
    pub quick_view: Option<ProductView>,
}

/// Display every catalog product in file order.
///
/// `?view={id}` opens that product in a modal over the grid. Ids the catalog
/// does not know render the plain page.
#[instrument(skip(state, store))]
pub async fn home(
    State(state): State<AppState>,
    store: CartStore,
    Query(query): Query<HomeQuery>,
) -> Result<HomeTemplate> {
    let cart = store.load().await?;

    let products: Vec<ProductView> = state
        .catalog()
        .iter()
        .map(|product| ProductView::new(product, state.currency(), cart.quantity_of(&product.id)))
        .collect();

    let quick_view = query
        .view
        .as_deref()
        .and_then(|id| state.catalog().get(&ProductId::new(id)))
        .map(|product| {
            let view = ProductView::new(product, state.currency(), cart.quantity_of(&product.id));
            let return_to = format!("/?view={}", view.path_id);
            view.returning_to(return_to)
        });

    Ok(HomeTemplate {
        layout: LayoutView::new(&state, &cart),
        products,
        quick_view,
    })
}
