//! Read-only product catalog.
//!
//! The catalog is loaded once at startup and never mutated. Products keep the
//! order they were supplied in; lookups by id go through a hash index.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, ProductId, ProductIdError};

/// Errors raised while building a [`Catalog`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog document is not valid JSON or does not match the schema.
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// A product has a malformed id.
    #[error("product #{index} has an invalid id: {source}")]
    InvalidId {
        /// Zero-based position of the product in the document.
        index: usize,
        /// Underlying id error.
        source: ProductIdError,
    },

    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product has a negative price.
    #[error("product {id} has a negative price ({price})")]
    NegativePrice {
        /// Offending product.
        id: ProductId,
        /// The rejected price.
        price: Decimal,
    },

    /// A product has no display name.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Size label, e.g. "Large (90g)".
    #[serde(default)]
    pub size: String,
    /// Qualitative rating shown next to the product, e.g. "★★★★★".
    #[serde(default, alias = "delightLevel")]
    pub delight_level: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Product {
    /// Unit price tagged with a currency.
    #[must_use]
    pub const fn unit_price(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.price, currency_code)
    }
}

/// The fixed set of products known to the store.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`Catalog::validate`].
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if let Some(err) = Self::validate(&products).into_iter().next() {
            return Err(err);
        }

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();

        Ok(Self { products, index })
    }

    /// Parse a JSON array of products into a catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if the document does not parse, or a
    /// validation error from [`Catalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Check a product list and return every problem found.
    #[must_use]
    pub fn validate(products: &[Product]) -> Vec<CatalogError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::with_capacity(products.len());

        for (index, product) in products.iter().enumerate() {
            if let Err(source) = ProductId::parse(product.id.as_str()) {
                errors.push(CatalogError::InvalidId { index, source });
            }

            if !seen.insert(&product.id) {
                errors.push(CatalogError::DuplicateId(product.id.clone()));
            }

            if product.price < Decimal::ZERO {
                errors.push(CatalogError::NegativePrice {
                    id: product.id.clone(),
                    price: product.price,
                });
            }

            if product.name.trim().is_empty() {
                errors.push(CatalogError::EmptyName(product.id.clone()));
            }
        }

        errors
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    /// Whether a product with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
