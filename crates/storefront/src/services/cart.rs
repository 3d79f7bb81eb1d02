//! Cart workflows behind the storefront pages.
//!
//! Every function here reads the full cart, applies one core operation, and
//! writes the full cart back. Save failures are logged and the in-memory
//! result is still returned, so a page always renders what the visitor did.

use thriftkids_core::{
    Cart, CartSummary, Catalog, Checkout, CheckoutError, CheckoutForm, ProductId, Quantity,
    ValidatedOrder,
};
use tracing::instrument;

use crate::cart_store::CartStore;

async fn persist<S: CartStore>(store: &S, cart: &Cart) {
    if let Err(e) = store.save(cart).await {
        tracing::error!("Failed to save cart: {e}");
    }
}

/// Add units of a product, defaulting unusable quantity input to one.
///
/// Returns the cart after the change.
#[instrument(skip(store))]
pub async fn add_to_cart<S: CartStore>(store: &S, id: ProductId, quantity: Option<&str>) -> Cart {
    let quantity = Quantity::parse_or_default(quantity);
    let mut cart = store.load().await;
    let total = cart.add(id, quantity);
    tracing::debug!(%quantity, %total, "Added to cart");
    persist(store, &cart).await;
    cart
}

/// Remove a product's whole line.
///
/// Returns the cart after the change.
#[instrument(skip(store))]
pub async fn remove_from_cart<S: CartStore>(store: &S, id: &str) -> Cart {
    let mut cart = store.load().await;
    if cart.remove(id) {
        persist(store, &cart).await;
    } else {
        tracing::debug!("Product was not in cart");
    }
    cart
}

/// Current badge count.
pub async fn badge_count<S: CartStore>(store: &S) -> u64 {
    store.load().await.badge_count()
}

/// Cart page: prune ids the catalog no longer knows, then summarise.
///
/// Returns `None` (after logging) when there is no catalog; nothing is
/// pruned in that case.
#[instrument(skip_all)]
pub async fn review_cart<S: CartStore>(store: &S, catalog: Option<&Catalog>) -> Option<CartSummary> {
    let Some(catalog) = catalog else {
        tracing::error!("Catalog is missing; cart page cannot render");
        return None;
    };

    let mut cart = store.load().await;
    let pruned = cart.prune_unknown(catalog);
    if !pruned.is_empty() {
        tracing::info!(?pruned, "Pruned unknown products from cart");
        persist(store, &cart).await;
    }
    Some(CartSummary::build(&cart, catalog))
}

/// Summary without pruning: unknown ids are skipped. Used by the checkout
/// page and by cart re-renders after a removal.
///
/// Returns `None` (after logging) when there is no catalog.
#[instrument(skip_all)]
pub async fn summarize_cart<S: CartStore>(
    store: &S,
    catalog: Option<&Catalog>,
) -> Option<CartSummary> {
    let Some(catalog) = catalog else {
        tracing::error!("Catalog is missing; cart summary cannot render");
        return None;
    };
    let cart = store.load().await;
    Some(CartSummary::build(&cart, catalog))
}

/// Submit the checkout form, advancing `checkout` on success.
///
/// On valid input the stored cart is cleared unconditionally. On invalid
/// input nothing is touched and `checkout` stays in review.
///
/// # Errors
///
/// Returns the [`CheckoutError`] from [`Checkout::submit`].
#[instrument(skip_all)]
pub async fn submit_checkout<S: CartStore>(
    store: &S,
    checkout: &mut Checkout,
    form: &CheckoutForm,
) -> Result<ValidatedOrder, CheckoutError> {
    let order = checkout.submit(form)?;

    if let Err(e) = store.clear().await {
        tracing::error!("Failed to clear cart after checkout: {e}");
    }
    tracing::info!("Checkout submitted, cart cleared");
    Ok(order)
}
