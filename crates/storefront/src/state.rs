//! Application state shared across handlers.

use std::sync::Arc;

use ttp_core::{Catalog, CheckoutSettings, CurrencyCode};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers read-only
/// access to the configuration and the catalog. Cart state is never stored
/// here; it lives in each visitor's session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    checkout: CheckoutSettings,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let checkout = config.whatsapp.checkout_settings();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                checkout,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the WhatsApp checkout settings.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutSettings {
        &self.inner.checkout
    }

    /// Currency all prices are quoted in.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.config.currency
    }
}
