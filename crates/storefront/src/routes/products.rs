//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use thriftkids_core::{Cart, Catalog, CatalogEntry, Price, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::{CartStore, SessionCartStore};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone, Debug)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub url: String,
    /// Already in the cart: the add button renders disabled as "In Cart".
    pub in_cart: bool,
}

impl ProductCardView {
    fn new(id: &ProductId, entry: &CatalogEntry, catalog: &Catalog, cart: &Cart) -> Self {
        Self {
            id: id.to_string(),
            name: entry.name.clone(),
            price: Price::new(entry.price, catalog.currency_code()).display(),
            image: entry.image.clone(),
            url: entry.url.clone(),
            in_cart: cart.contains(id.as_str()),
        }
    }

    fn list(catalog: &Catalog, cart: &Cart) -> Vec<Self> {
        catalog
            .iter()
            .map(|(id, entry)| Self::new(id, entry, catalog, cart))
            .collect()
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub cart_count: u64,
    pub catalog_missing: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductCardView,
    pub cart_count: u64,
}

/// Display product listing page.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = SessionCartStore::new(session).load().await;

    let products = state
        .catalog()
        .map(|catalog| ProductCardView::list(catalog, &cart))
        .unwrap_or_default();

    ProductsIndexTemplate {
        products,
        cart_count: cart.badge_count(),
        catalog_missing: state.catalog().is_none(),
    }
}

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let not_found = || AppError::NotFound(format!("product {id}"));
    let catalog = state.catalog().ok_or_else(not_found)?;
    let id = ProductId::parse(&id).map_err(|_| not_found())?;
    let entry = catalog.get(id.as_str()).ok_or_else(not_found)?;

    let cart = SessionCartStore::new(session).load().await;
    Ok(ProductShowTemplate {
        product: ProductCardView::new(&id, entry, catalog, &cart),
        cart_count: cart.badge_count(),
    })
}
