//! End-to-end cart flows driven through the storefront router.
//!
//! Requests go through the full layer stack in-process with an in-memory
//! session store. The session cookie is carried between requests by hand,
//! the way a browser would.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use sqlx::sqlite::SqlitePoolOptions;
use thriftkids_core::Catalog;
use thriftkids_storefront::{
    app, catalog::load_catalog, config::StorefrontConfig, middleware::create_session_layer,
    state::AppState,
};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

// =============================================================================
// Harness
// =============================================================================

struct Visitor {
    app: Router,
    cookie: Option<String>,
}

impl Visitor {
    fn new(catalog: Option<Catalog>) -> Self {
        let config = StorefrontConfig::default();
        let pool = SqlitePoolOptions::new()
            .connect_lazy("sqlite::memory:")
            .unwrap();
        let session_layer = create_session_layer(MemoryStore::default(), &config);
        let state = AppState::new(config, pool, catalog);
        Self {
            app: app(state, session_layer),
            cookie: None,
        }
    }

    fn with_bundled_catalog() -> Self {
        let config = StorefrontConfig::default();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("content/catalog.json");
        Self::new(Some(load_catalog(&path, config.currency).unwrap()))
    }

    async fn send(&mut self, request: Request<Body>) -> (StatusCode, Response<Body>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        (response.status(), response)
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn get(&mut self, uri: &str) -> (StatusCode, String) {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        let (status, response) = self.send(request).await;
        (status, body_text(response).await)
    }

    async fn post_form(&mut self, uri: &str, form: &str, htmx: bool) -> Response<Body> {
        let mut builder = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        let (_, response) = self.send(builder.body(Body::from(form.to_string())).unwrap()).await;
        response
    }

    async fn add(&mut self, id: &str, quantity: &str) -> Response<Body> {
        self.post_form("/cart/add", &format!("product_id={id}&quantity={quantity}"), true)
            .await
    }

    async fn badge(&mut self) -> u64 {
        let (status, body) = self.get("/cart/count").await;
        assert_eq!(status, StatusCode::OK);
        let start = body.find('>').unwrap() + 1;
        let end = body[start..].find('<').unwrap() + start;
        body[start..end].trim().parse().unwrap()
    }
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn hx_trigger(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("HX-Trigger")
        .map(|v| v.to_str().unwrap())
}

// =============================================================================
// Listing and badge
// =============================================================================

#[tokio::test]
async fn test_listing_shows_catalog_and_empty_badge() {
    let mut visitor = Visitor::with_bundled_catalog();
    let (status, body) = visitor.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Striped Cotton Tee"));
    assert!(body.contains("$14.25"));
    assert!(!body.contains("In Cart"));
    assert_eq!(visitor.badge().await, 0);
}

#[tokio::test]
async fn test_listing_marks_products_already_in_cart() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku2", "1").await;

    let (_, body) = visitor.get("/").await;
    assert_eq!(body.matches("In Cart").count(), 1);
}

#[tokio::test]
async fn test_product_detail_and_unknown_product() {
    let mut visitor = Visitor::with_bundled_catalog();

    let (status, body) = visitor.get("/products/sku3").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Knit Winter Hat"));

    let (status, _) = visitor.get("/products/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Adding
// =============================================================================

#[tokio::test]
async fn test_htmx_add_returns_in_cart_button_and_trigger() {
    let mut visitor = Visitor::with_bundled_catalog();
    let response = visitor.add("sku1", "3").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hx_trigger(&response), Some("cart-updated"));
    let body = body_text(response).await;
    assert!(body.contains("In Cart"));
    assert!(body.contains("disabled"));

    assert_eq!(visitor.badge().await, 3);
}

#[tokio::test]
async fn test_repeat_adds_merge_quantities() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "2").await;
    visitor.add("sku1", "3").await;
    visitor.add("sku2", "1").await;

    assert_eq!(visitor.badge().await, 6);
}

#[tokio::test]
async fn test_unusable_quantity_adds_one() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "0").await;
    visitor.add("sku2", "-4").await;
    visitor.add("sku3", "lots").await;
    visitor
        .post_form("/cart/add", "product_id=sku4", true)
        .await;

    assert_eq!(visitor.badge().await, 4);
}

#[tokio::test]
async fn test_blank_product_id_is_rejected() {
    let mut visitor = Visitor::with_bundled_catalog();
    let response = visitor.add("%20%20", "1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(hx_trigger(&response), None);
}

#[tokio::test]
async fn test_plain_form_add_redirects_home() {
    let mut visitor = Visitor::with_bundled_catalog();
    let response = visitor
        .post_form("/cart/add", "product_id=sku1&quantity=2", false)
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    assert_eq!(visitor.badge().await, 2);
}

// =============================================================================
// Cart page
// =============================================================================

#[tokio::test]
async fn test_cart_page_renders_lines_and_total() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "2").await;
    visitor.add("sku2", "1").await;

    let (status, body) = visitor.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("cart-page"));
    assert!(body.contains("Striped Cotton Tee"));
    assert!(body.contains("$20.00"));
    assert!(body.contains("Yellow Rain Boots"));
    assert!(body.contains("$25.00"));
    assert!(body.contains("checkout-btn"));
}

#[tokio::test]
async fn test_cart_page_prunes_unknown_products() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "2").await;
    visitor.add("ghost", "4").await;
    assert_eq!(visitor.badge().await, 6);

    let (status, body) = visitor.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("ghost"));
    assert!(body.contains("$20.00"));
    assert_eq!(visitor.badge().await, 2);
}

#[tokio::test]
async fn test_largest_quantity_still_renders() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku4", "4294967295").await;
    visitor.add("sku4", "4294967295").await;

    let (status, body) = visitor.get("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("$61203283953.75"));

    let (status, _) = visitor.get("/checkout").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_empty_cart_page() {
    let mut visitor = Visitor::with_bundled_catalog();
    let (status, body) = visitor.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("$0.00"));
}

#[tokio::test]
async fn test_htmx_remove_returns_rebuilt_table() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "2").await;
    visitor.add("sku2", "1").await;

    let response = visitor
        .post_form("/cart/remove", "product_id=sku1", true)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hx_trigger(&response), Some("cart-updated"));
    let body = body_text(response).await;
    assert!(body.contains("cart-items"));
    assert!(!body.contains("Striped Cotton Tee"));
    assert!(body.contains("Yellow Rain Boots"));
    assert!(body.contains("$5.00"));

    assert_eq!(visitor.badge().await, 1);
}

#[tokio::test]
async fn test_plain_form_remove_redirects_to_cart() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "1").await;

    let response = visitor
        .post_form("/cart/remove", "product_id=sku1", false)
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");
    assert_eq!(visitor.badge().await, 0);
}

#[tokio::test]
async fn test_missing_catalog_leaves_cart_untouched() {
    let mut visitor = Visitor::new(None);
    visitor.add("sku1", "2").await;

    let (status, body) = visitor.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("can&#39;t be shown") || body.contains("can't be shown"));
    assert_eq!(visitor.badge().await, 2);
}

// =============================================================================
// Checkout
// =============================================================================

const VALID_ORDER: &str = "full_name=Ada+Lovelace&email=ada%40example.com\
    &address=12+Analytical+Way&city=London&postal_code=N1+9GU";

#[tokio::test]
async fn test_checkout_page_summarises_cart() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku3", "2").await;

    let (status, body) = visitor.get("/checkout").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("summary-table"));
    assert!(body.contains("Knit Winter Hat"));
    assert!(body.contains("$15.00"));
    assert!(body.contains("checkout-form"));
}

#[tokio::test]
async fn test_invalid_checkout_reports_fields_and_keeps_cart() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "1").await;

    let response = visitor
        .post_form("/checkout", "full_name=Ada&email=not-an-email", false)
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("field-error"));
    assert!(body.contains("value=\"Ada\""));
    assert!(!body.contains("thank-you"));

    assert_eq!(visitor.badge().await, 1);
}

#[tokio::test]
async fn test_valid_checkout_clears_cart_and_confirms() {
    let mut visitor = Visitor::with_bundled_catalog();
    visitor.add("sku1", "1").await;

    let response = visitor.post_form("/checkout", VALID_ORDER, false).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("thank-you"));
    assert!(body.contains("Ada Lovelace"));
    assert!(!body.contains("checkout-form"));

    assert_eq!(visitor.badge().await, 0);
    let (_, cart) = visitor.get("/cart").await;
    assert!(cart.contains("Your cart is empty"));
}

// =============================================================================
// Plumbing
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let mut visitor = Visitor::with_bundled_catalog();

    let (status, body) = visitor.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = visitor.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut visitor = Visitor::with_bundled_catalog();
    let (status, _) = visitor.get("/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let mut visitor = Visitor::with_bundled_catalog();
    let request = visitor.request("GET", "/").body(Body::empty()).unwrap();
    let (_, response) = visitor.send(request).await;
    assert!(response.headers().contains_key("x-request-id"));
}
