//! Integration tests for the T-The-Plug storefront.
//!
//! Each test starts its own storefront on `127.0.0.1:0` with the bundled
//! catalog and drives it over HTTP with a cookie-keeping client, so every test
//! gets a fresh session store and rate limiter.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ttp-integration-tests
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;
use ttp_storefront::config::StorefrontConfig;
use ttp_storefront::services::load_catalog;
use ttp_storefront::state::AppState;

/// WhatsApp number the test storefront sends orders to.
pub const TEST_RECIPIENT: &str = "233201234567";

/// A storefront running in the current test's runtime.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

fn storefront_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront")
}

fn test_config() -> StorefrontConfig {
    let root = storefront_dir();
    let vars: HashMap<&str, String> = HashMap::from([
        ("STOREFRONT_WHATSAPP_NUMBER", TEST_RECIPIENT.to_string()),
        (
            "STOREFRONT_CATALOG_PATH",
            root.join("content/catalog.json").display().to_string(),
        ),
        (
            "STOREFRONT_STATIC_DIR",
            root.join("static").display().to_string(),
        ),
    ]);

    StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

impl TestServer {
    /// Start a storefront on an ephemeral port.
    ///
    /// The client keeps cookies and does not follow redirects, so tests can
    /// inspect `303` responses directly.
    pub async fn spawn() -> Self {
        let config = test_config();
        let catalog = load_catalog(&config.catalog_path)
            .await
            .expect("Failed to load bundled catalog");
        let app = ttp_storefront::app(AppState::new(config, catalog));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(ttp_storefront::serve(
            listener,
            app,
            std::future::pending(),
        ));

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Post a cart form for `product_id`.
    pub async fn cart_action(&self, action: &str, product_id: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/cart/{action}")))
            .form(&[("product_id", product_id)])
            .send()
            .await
            .expect("Cart request failed")
    }

    /// Fetch `/api/cart` as JSON.
    pub async fn cart_json(&self) -> Value {
        self.client
            .get(self.url("/api/cart"))
            .send()
            .await
            .expect("Cart API request failed")
            .json()
            .await
            .expect("Cart API returned invalid JSON")
    }

    /// Fetch a page body as text.
    pub async fn page(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Page request failed");
        let status = resp.status();
        let body = resp.text().await.expect("Failed to read response body");
        (status, body)
    }
}

/// Quantity of `product_id` in a `/api/cart` body, 0 if absent.
#[must_use]
pub fn quantity_in(cart: &Value, product_id: &str) -> u64 {
    cart["items"]
        .as_array()
        .into_iter()
        .flatten()
        .find(|item| item["product_id"] == product_id)
        .and_then(|item| item["quantity"].as_u64())
        .unwrap_or(0)
}
