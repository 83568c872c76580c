//! Integration tests for the storefront pages and cart routes.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use reqwest::header::{CONTENT_SECURITY_POLICY, LOCATION};
use ttp_integration_tests::{TestServer, quantity_in};

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_health() {
    let server = TestServer::spawn().await;
    let (status, body) = server.page("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_home_lists_catalog() {
    let server = TestServer::spawn().await;
    let (status, body) = server.page("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Oreo Overload"));
    assert!(body.contains("Lotus Biscoff Melt"));
    assert!(body.contains("GHS 35.00"));
    assert!(body.contains("GHS 38.00"));
}

#[tokio::test]
async fn test_product_pages() {
    let server = TestServer::spawn().await;

    let (status, body) = server.page("/products/oreo-delight").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Oreo Overload"));
    assert!(body.contains("<html"));

    let (status, body) = server.page("/products/oreo-delight/quick-view").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Oreo Overload"));
    assert!(!body.contains("<html"));

    let (status, _) = server.page("/products/ghost-cookie").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.page("/products/ghost-cookie/quick-view").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quick_view_modal_on_catalog_page() {
    let server = TestServer::spawn().await;

    let (_, body) = server.page("/").await;
    assert!(body.contains(r#"href="/?view=oreo-delight""#));
    assert!(!body.contains(r#"class="modal""#));

    let (status, body) = server.page("/?view=oreo-delight").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"class="modal""#));
    assert!(body.contains(r#"name="return_to" value="/?view=oreo-delight""#));

    let (status, body) = server.page("/?view=ghost-cookie").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains(r#"class="modal""#));
    assert!(body.contains("Oreo Overload"));
}

#[tokio::test]
async fn test_security_headers_allow_whatsapp_form_action() {
    let server = TestServer::spawn().await;
    let resp = server.client.get(server.url("/")).send().await.unwrap();

    let csp = resp
        .headers()
        .get(CONTENT_SECURITY_POLICY)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("form-action 'self' https://wa.me"));
    assert!(resp.headers().contains_key("x-request-id"));
}

// ============================================================================
// Cart Operations
// ============================================================================

#[tokio::test]
async fn test_empty_cart() {
    let server = TestServer::spawn().await;

    let cart = server.cart_json().await;
    assert_eq!(cart["item_count"], 0);
    assert_eq!(cart["display_total"], "GHS 0.00");

    let (status, body) = server.page("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_cart_mutation_redirects() {
    let server = TestServer::spawn().await;

    let resp = server.cart_action("add", "oreo-delight").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/cart");

    let resp = server
        .client
        .post(server.url("/cart/add"))
        .form(&[("product_id", "oreo-delight"), ("return_to", "/products/oreo-delight")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()[LOCATION], "/products/oreo-delight");

    let resp = server
        .client
        .post(server.url("/cart/add"))
        .form(&[("product_id", "oreo-delight"), ("return_to", "//evil.example")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()[LOCATION], "/cart");
}

#[tokio::test]
async fn test_add_increase_decrease_remove() {
    let server = TestServer::spawn().await;

    server.cart_action("add", "oreo-delight").await;
    server.cart_action("add", "oreo-delight").await;
    server.cart_action("add", "lotus-biscoff").await;

    let cart = server.cart_json().await;
    assert_eq!(quantity_in(&cart, "oreo-delight"), 2);
    assert_eq!(quantity_in(&cart, "lotus-biscoff"), 1);
    assert_eq!(cart["item_count"], 3);
    assert_eq!(cart["display_total"], "GHS 108.00");

    server.cart_action("increase", "lotus-biscoff").await;
    assert_eq!(quantity_in(&server.cart_json().await, "lotus-biscoff"), 2);

    server.cart_action("decrease", "oreo-delight").await;
    server.cart_action("decrease", "oreo-delight").await;
    let cart = server.cart_json().await;
    assert_eq!(quantity_in(&cart, "oreo-delight"), 0);
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    server.cart_action("remove", "lotus-biscoff").await;
    let cart = server.cart_json().await;
    assert_eq!(cart["item_count"], 0);
    assert!(cart["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_increase_absent_is_noop() {
    let server = TestServer::spawn().await;

    server.cart_action("increase", "oreo-delight").await;
    server.cart_action("decrease", "lotus-biscoff").await;

    let cart = server.cart_json().await;
    assert!(cart["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product_kept_in_cart_but_not_summary() {
    let server = TestServer::spawn().await;

    server.cart_action("add", "ghost-cookie").await;
    server.cart_action("add", "lotus-biscoff").await;

    let cart = server.cart_json().await;
    assert_eq!(quantity_in(&cart, "ghost-cookie"), 1);
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["summary"]["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["display_total"], "GHS 38.00");

    let (_, body) = server.page("/cart").await;
    assert!(body.contains("Lotus Biscoff Melt"));
    assert!(!body.contains("ghost-cookie"));
}

#[tokio::test]
async fn test_clear_and_count() {
    let server = TestServer::spawn().await;

    server.cart_action("add", "oreo-delight").await;
    server.cart_action("add", "oreo-delight").await;

    let (status, body) = server.page("/cart/count").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">2<"));

    let resp = server
        .client
        .post(server.url("/cart/clear"))
        .form(&[("return_to", "/")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/");

    let (_, body) = server.page("/cart/count").await;
    assert!(body.contains(">0<"));
}

#[tokio::test]
async fn test_malformed_ids_on_absent_lines_are_noops() {
    let server = TestServer::spawn().await;
    server.cart_action("add", "oreo-delight").await;
    let before = server.cart_json().await;

    let resp = server.cart_action("decrease", " oreo-delight").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/cart");

    let resp = server.cart_action("remove", "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = server.cart_action("increase", "oreo-delight ").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    assert_eq!(server.cart_json().await, before);
    assert_eq!(quantity_in(&before, "oreo-delight"), 1);
}

#[tokio::test]
async fn test_malformed_ids_are_added_but_left_out_of_summary() {
    let server = TestServer::spawn().await;

    let resp = server.cart_action("add", "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = server.cart_action("add", " oreo-delight").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let cart = server.cart_json().await;
    assert_eq!(quantity_in(&cart, ""), 1);
    assert_eq!(quantity_in(&cart, " oreo-delight"), 1);
    assert!(cart["summary"]["lines"].as_array().unwrap().is_empty());
    assert_eq!(cart["display_total"], "GHS 0.00");
}

#[tokio::test]
async fn test_oversized_id_is_ignored() {
    let server = TestServer::spawn().await;
    let long_id = "x".repeat(200);

    let resp = server.cart_action("add", &long_id).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/cart");

    let cart = server.cart_json().await;
    assert!(cart["items"].as_array().unwrap().is_empty());
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let first = TestServer::spawn().await;
    first.cart_action("add", "oreo-delight").await;

    let other_client = reqwest::Client::builder().cookie_store(true).build().unwrap();
    let cart: serde_json::Value = other_client
        .get(first.url("/api/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(cart["items"].as_array().unwrap().is_empty());
    assert_eq!(quantity_in(&first.cart_json().await, "oreo-delight"), 1);
}

#[tokio::test]
async fn test_catalog_api() {
    let server = TestServer::spawn().await;
    let catalog: serde_json::Value = server
        .client
        .get(server.url("/api/catalog"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(catalog["currency"], "GHS");
    let products = catalog["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["id"], "oreo-delight");
    assert_eq!(products[0]["price"], "35.00");
}
