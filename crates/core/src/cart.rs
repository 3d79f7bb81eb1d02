//! The persisted shopping cart.
//!
//! A [`Cart`] maps product ids to positive quantities and is persisted as a
//! single flat JSON object under [`CART_STORAGE_KEY`]:
//!
//! ```json
//! { "sku1": 2, "sku2": 1 }
//! ```
//!
//! Readers do direct field access on that object, so the shape must stay flat.
//! Entries keep the order in which they were first added; removal preserves the
//! relative order of what remains.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Catalog;
use crate::types::{ProductId, Quantity};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "thriftkids_cart";

/// Reasons a stored value does not have the cart shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartShapeError {
    /// The stored text is not JSON.
    #[error("stored cart is not valid JSON: {0}")]
    Json(String),
    /// The stored value is JSON but not an object.
    #[error("stored cart is not a JSON object")]
    NotAnObject,
    /// A key is blank.
    #[error("stored cart has a blank product id")]
    BlankProductId,
    /// A value is not a positive integer that fits a quantity.
    #[error("stored quantity for {id} is not a positive integer: {value}")]
    InvalidQuantity {
        /// Offending key.
        id: String,
        /// Offending value, rendered as JSON.
        value: String,
    },
}

/// Mapping from product id to quantity, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: IndexMap<ProductId, Quantity>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a stored value into a cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartShapeError`] unless `value` is an object whose every
    /// key is a non-blank string and every value an integer in `1..=u32::MAX`.
    ///
    /// Keys that name the same product once trimmed (`"sku1"`, `" sku1"`)
    /// are merged into one line with their quantities added, as repeated
    /// adds would have done.
    pub fn from_value(value: &Value) -> Result<Self, CartShapeError> {
        let Value::Object(map) = value else {
            return Err(CartShapeError::NotAnObject);
        };

        let mut lines = IndexMap::with_capacity(map.len());
        for (key, raw) in map {
            let id = ProductId::parse(key).map_err(|_| CartShapeError::BlankProductId)?;
            let quantity = raw
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .and_then(Quantity::new)
                .ok_or_else(|| CartShapeError::InvalidQuantity {
                    id: key.clone(),
                    value: raw.to_string(),
                })?;
            lines
                .entry(id)
                .and_modify(|q: &mut Quantity| *q = q.saturating_add(quantity))
                .or_insert(quantity);
        }

        Ok(Self { lines })
    }

    /// Validate stored text into a cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartShapeError::Json`] for unparsable text, otherwise the
    /// errors of [`Cart::from_value`].
    pub fn from_json_str(text: &str) -> Result<Self, CartShapeError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| CartShapeError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// The flat JSON object this cart is persisted as.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.lines
                .iter()
                .map(|(id, qty)| (id.to_string(), Value::from(qty.get())))
                .collect(),
        )
    }

    /// Add `quantity` units of a product, merging with any existing line.
    ///
    /// Repeated calls accumulate. Returns the line's new quantity.
    pub fn add(&mut self, id: ProductId, quantity: Quantity) -> Quantity {
        let line = self
            .lines
            .entry(id)
            .and_modify(|q| *q = q.saturating_add(quantity))
            .or_insert(quantity);
        *line
    }

    /// Remove a whole line regardless of its quantity.
    ///
    /// Returns `true` if the product was in the cart.
    pub fn remove(&mut self, id: &str) -> bool {
        self.lines.shift_remove(id).is_some()
    }

    /// Drop every line whose product the catalog does not know.
    ///
    /// Returns the pruned ids in cart order.
    pub fn prune_unknown(&mut self, catalog: &Catalog) -> Vec<ProductId> {
        let mut pruned = Vec::new();
        self.lines.retain(|id, _| {
            let known = catalog.contains(id.as_str());
            if !known {
                pruned.push(id.clone());
            }
            known
        });
        pruned
    }

    /// Total units across all lines (what the cart badge shows).
    #[must_use]
    pub fn badge_count(&self) -> u64 {
        self.lines.values().map(|q| u64::from(q.get())).sum()
    }

    /// Quantity of one product, if present.
    #[must_use]
    pub fn quantity_of(&self, id: &str) -> Option<Quantity> {
        self.lines.get(id).copied()
    }

    /// Whether the product has a line.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.lines.contains_key(id)
    }

    /// Lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, Quantity)> {
        self.lines.iter().map(|(id, q)| (id, *q))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
