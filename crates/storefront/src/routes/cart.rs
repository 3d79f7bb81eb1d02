//! Cart route handlers.
//!
//! Cart operations use HTMX for in-place updates, with plain form posts
//! falling back to redirects. The cart itself lives in the visitor's session
//! under the `thriftkids_cart` key.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use thriftkids_core::{CartSummary, CurrencyCode, LineItem, Price, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::SessionCartStore;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::is_htmx;
use crate::services::cart as cart_service;
use crate::state::AppState;

/// HTMX event other page elements listen for to refresh themselves.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone, Debug)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    fn new(item: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.entry.name.clone(),
            image: item.entry.image.clone(),
            url: item.entry.url.clone(),
            quantity: item.quantity.get(),
            price: Price::new(item.entry.price, currency).display(),
            line_price: Price::new(item.subtotal, currency).display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone, Debug)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            total: Price::zero(currency).display(),
            item_count: 0,
        }
    }
}

impl From<&CartSummary> for CartView {
    fn from(summary: &CartSummary) -> Self {
        let currency = summary.grand_total.currency_code;
        Self {
            items: summary
                .line_items
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            total: summary.grand_total.display(),
            item_count: summary.badge_count,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u64,
    pub catalog_missing: bool,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Add-to-cart button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/add_button.html")]
pub struct AddButtonTemplate {
    pub id: String,
    pub in_cart: bool,
}

fn currency(state: &AppState) -> CurrencyCode {
    state
        .catalog()
        .map_or(state.config().currency, thriftkids_core::Catalog::currency_code)
}

/// Display cart page.
///
/// Products the catalog no longer knows are pruned from the cart before the
/// first render.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = SessionCartStore::new(session);

    match cart_service::review_cart(&store, state.catalog()).await {
        Some(summary) => CartShowTemplate {
            cart: CartView::from(&summary),
            cart_count: summary.badge_count,
            catalog_missing: false,
        },
        None => CartShowTemplate {
            cart: CartView::empty(currency(&state)),
            cart_count: cart_service::badge_count(&store).await,
            catalog_missing: true,
        },
    }
}

/// Add item to cart.
///
/// HTMX requests get the disabled "In Cart" button back along with a
/// `cart-updated` trigger for the badge; plain posts are redirected home.
#[instrument(skip(session, headers))]
pub async fn add(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::parse(&form.product_id).map_err(|e| AppError::BadRequest(e.to_string()))?;
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

    let store = SessionCartStore::new(session);
    cart_service::add_to_cart(&store, id.clone(), form.quantity.as_deref()).await;

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/").into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        AddButtonTemplate {
            id: id.to_string(),
            in_cart: true,
        },
    )
        .into_response())
}

/// Remove a whole line from the cart.
///
/// HTMX requests get the rebuilt cart table; plain posts are redirected to
/// the cart page.
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = ProductId::parse(&form.product_id).map_err(|e| AppError::BadRequest(e.to_string()))?;
    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));

    let store = SessionCartStore::new(session);
    cart_service::remove_from_cart(&store, id.as_str()).await;

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/cart").into_response());
    }

    let cart = cart_service::summarize_cart(&store, state.catalog())
        .await
        .map_or_else(|| CartView::empty(currency(&state)), |s| CartView::from(&s));

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let store = SessionCartStore::new(session);
    CartCountTemplate {
        count: cart_service::badge_count(&store).await,
    }
}
