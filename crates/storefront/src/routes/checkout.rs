//! Checkout route handlers.
//!
//! Each page load starts a fresh checkout in review. A valid submission
//! clears the cart and swaps the summary and form for a confirmation; an
//! invalid one re-renders the form with per-field messages and leaves the
//! cart alone.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thriftkids_core::{Checkout, CheckoutError, CheckoutForm, FieldErrors};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::SessionCartStore;
use crate::error::add_breadcrumb;
use crate::routes::cart::CartView;
use crate::services::cart as cart_service;
use crate::state::AppState;

/// Checkout page template: order summary plus form.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub cart_count: u64,
    pub catalog_missing: bool,
    pub form: CheckoutForm,
    pub errors: FieldErrors,
}

/// Post-submission confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub full_name: String,
    pub email: String,
    pub cart_count: u64,
}

async fn review_page(
    state: &AppState,
    store: &SessionCartStore,
    form: CheckoutForm,
    errors: FieldErrors,
) -> CheckoutTemplate {
    let summary = cart_service::summarize_cart(store, state.catalog()).await;
    let cart_count = cart_service::badge_count(store).await;
    let cart = summary.as_ref().map_or_else(
        || CartView::empty(state.config().currency),
        CartView::from,
    );

    CheckoutTemplate {
        cart,
        cart_count,
        catalog_missing: summary.is_none(),
        form,
        errors,
    }
}

/// Display the order summary and checkout form.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let store = SessionCartStore::new(session);
    review_page(&state, &store, CheckoutForm::default(), FieldErrors::default()).await
}

/// Submit the checkout form.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let store = SessionCartStore::new(session);
    let mut checkout = Checkout::new();

    match cart_service::submit_checkout(&store, &mut checkout, &form).await {
        Ok(order) => {
            add_breadcrumb("checkout", "Order submitted", None);
            ConfirmationTemplate {
                full_name: order.full_name,
                email: order.email,
                cart_count: 0,
            }
            .into_response()
        }
        Err(CheckoutError::Invalid(errors)) => {
            tracing::debug!(%errors, "Checkout form rejected");
            let page = review_page(&state, &store, form, errors).await;
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
        Err(CheckoutError::AlreadySubmitted) => Redirect::to("/").into_response(),
    }
}
