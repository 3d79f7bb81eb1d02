//! Persisted cart storage.
//!
//! The cart lives under a single well-known key ([`CART_STORAGE_KEY`]) as a
//! flat JSON object. Every mutation is a whole-value read-modify-write: load
//! the full cart, change it in memory, save the full cart back.
//!
//! Reads are forgiving: a missing key, an unreadable backend, or a stored
//! value with the wrong shape all load as an empty cart and are only logged.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use thriftkids_core::{CART_STORAGE_KEY, Cart};
use tower_sessions::Session;

/// Errors writing the cart.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Durable home of one visitor's cart.
pub trait CartStore {
    /// Read the cart; never fails.
    fn load(&self) -> impl Future<Output = Cart> + Send;

    /// Overwrite the stored cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove the stored cart key entirely.
    fn clear(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Turn whatever was stored into a cart, logging and discarding bad shapes.
fn cart_from_stored(stored: Option<&Value>) -> Cart {
    let Some(value) = stored else {
        return Cart::new();
    };
    Cart::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding malformed stored cart");
        Cart::new()
    })
}

// =============================================================================
// Session-backed store
// =============================================================================

/// Cart stored in the visitor's session record.
///
/// The browser keeps only the session cookie; the session layer persists the
/// record (and so the cart key) when the response is sent.
#[derive(Clone, Debug)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Cart {
        match self.session.get::<Value>(CART_STORAGE_KEY).await {
            Ok(stored) => cart_from_stored(stored.as_ref()),
            Err(e) => {
                tracing::warn!("Failed to read cart from session: {e}");
                Cart::new()
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.session.insert(CART_STORAGE_KEY, cart.to_value()).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.session.remove::<Value>(CART_STORAGE_KEY).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Cart held in memory, for tests and tooling.
///
/// Stores the raw JSON value rather than a [`Cart`] so malformed data can be
/// planted and key removal can be observed.
#[derive(Clone, Debug, Default)]
pub struct MemoryCartStore {
    raw: Arc<Mutex<Option<Value>>>,
}

impl MemoryCartStore {
    /// An empty store (no key present).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose key already holds `value`, valid or not.
    #[must_use]
    pub fn with_raw(value: Value) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(value))),
        }
    }

    /// The value currently under the key, if any.
    #[must_use]
    pub fn raw(&self) -> Option<Value> {
        self.raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_raw(&self, value: Option<Value>) {
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Cart {
        cart_from_stored(self.raw().as_ref())
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.set_raw(Some(cart.to_value()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.set_raw(None);
        Ok(())
    }
}
