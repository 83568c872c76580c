//! Checkout preview command.
//!
//! Builds a cart the same way the storefront does (one `add_item` per unit),
//! then prints the message and deep link a customer would be sent to.

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use ttp_core::{
    Cart, CheckoutRequest, CheckoutSettings, CurrencyCode, OrderReferenceError, OrderSummary,
    ProductId, ProductIdError, prepare_checkout,
};

use super::catalog::{self, CatalogCommandError};

/// Largest quantity accepted for a single `--item`.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Errors that can occur while parsing an `--item` argument.
#[derive(Debug, Error)]
pub enum ItemArgError {
    #[error("invalid product id: {0}")]
    InvalidId(#[from] ProductIdError),

    #[error("quantity must be a whole number from 1 to 999, got {0:?}")]
    InvalidQuantity(String),
}

/// Errors that can occur during a checkout preview.
#[derive(Debug, Error)]
pub enum CheckoutCommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogCommandError),

    #[error("WhatsApp number must be digits only, got {0:?}")]
    InvalidNumber(String),

    #[error("Order reference error: {0}")]
    Reference(#[from] OrderReferenceError),
}

/// One `--item id[=quantity]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl FromStr for ItemArg {
    type Err = ItemArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once('=') {
            Some((id, quantity)) => {
                let quantity = quantity
                    .parse::<u32>()
                    .ok()
                    .filter(|q| (1..=MAX_ITEM_QUANTITY).contains(q))
                    .ok_or_else(|| ItemArgError::InvalidQuantity(quantity.to_owned()))?;
                (id, quantity)
            }
            None => (s, 1),
        };

        Ok(Self {
            product_id: ProductId::parse(id)?,
            quantity,
        })
    }
}

/// Settings for a preview run.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub number: String,
    pub business_name: String,
    pub prefix: String,
    pub currency: CurrencyCode,
}

/// Build a cart from item arguments in argument order.
#[must_use]
pub fn build_cart(items: &[ItemArg]) -> Cart {
    let mut cart = Cart::new();
    for item in items {
        for _ in 0..item.quantity {
            cart.add_item(item.product_id.clone());
        }
    }
    cart
}

/// Print the checkout message and link for `items`.
///
/// Returns `None` when nothing in the cart resolves against the catalog.
///
/// # Errors
///
/// Returns an error if the catalog is invalid, the number is malformed, or
/// the prefix cannot form an order reference.
#[allow(clippy::print_stdout)]
pub async fn preview(
    catalog_path: &Path,
    items: &[ItemArg],
    options: &PreviewOptions,
) -> Result<Option<CheckoutRequest>, CheckoutCommandError> {
    if options.number.is_empty() || !options.number.chars().all(|c| c.is_ascii_digit()) {
        return Err(CheckoutCommandError::InvalidNumber(options.number.clone()));
    }

    let catalog = catalog::load(catalog_path).await?;
    let cart = build_cart(items);

    for item in cart.items() {
        if !catalog.contains(&item.product_id) {
            tracing::warn!(product_id = %item.product_id, "Unknown product dropped from summary");
        }
    }

    let summary = OrderSummary::build(&cart, &catalog, options.currency);

    let settings = CheckoutSettings {
        business_name: options.business_name.clone(),
        order_prefix: options.prefix.clone(),
        ..CheckoutSettings::new(options.number.clone())
    };

    let mut rng = rand::rng();
    let Some(request) = prepare_checkout(&summary, &settings, &mut rng)? else {
        tracing::info!("Summary is empty; checkout would be skipped");
        return Ok(None);
    };

    tracing::info!(
        order_reference = %request.reference,
        item_count = summary.item_count(),
        total = %summary.display_total(),
        "Checkout preview"
    );

    println!("{}", request.message);
    println!();
    println!("{}", request.url);

    Ok(Some(request))
}
