//! Read-only product catalog.
//!
//! The catalog maps each [`ProductId`] to the attributes needed to render a
//! cart row: display name, unit price, image, and detail page URL. The cart
//! never writes to it; it is only consulted to resolve and to prune.
//!
//! # Document format
//!
//! ```json
//! {
//!   "sku1": { "name": "Striped Tee", "price": "10.00", "img": "/img/tee.jpg", "url": "/p/sku1" },
//!   "sku2": { "name": "Rain Boots", "price": 5, "image": "/img/boots.jpg", "url": "/p/sku2" }
//! }
//! ```
//!
//! Prices may be JSON numbers or decimal strings. They must not be negative
//! and must not exceed [`MAX_UNIT_PRICE`], which keeps every line subtotal
//! (price times any `u32` quantity) well inside `Decimal` range.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, ProductId};

/// Largest accepted unit price (one million in the catalog currency).
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The document is not a JSON object of catalog entries.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
    /// An entry carries a negative unit price.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    /// An entry's unit price is above [`MAX_UNIT_PRICE`].
    #[error("product {0} is priced above {MAX_UNIT_PRICE}")]
    PriceTooHigh(ProductId),
}

/// Display and pricing attributes for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Product name shown in cart rows.
    pub name: String,
    /// Unit price in the catalog's currency.
    pub price: Decimal,
    /// Image reference (URL or path).
    #[serde(alias = "img")]
    pub image: String,
    /// Product detail page URL.
    pub url: String,
}

/// Product catalog keyed by product id, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<ProductId, CatalogEntry>,
    currency_code: CurrencyCode,
}

impl Catalog {
    /// Build a catalog from already-validated entries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NegativePrice`] or [`CatalogError::PriceTooHigh`]
    /// for the first entry priced out of range.
    pub fn new(
        entries: impl IntoIterator<Item = (ProductId, CatalogEntry)>,
        currency_code: CurrencyCode,
    ) -> Result<Self, CatalogError> {
        let entries: IndexMap<_, _> = entries.into_iter().collect();
        for (id, entry) in &entries {
            if entry.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(id.clone()));
            }
            if entry.price > MAX_UNIT_PRICE {
                return Err(CatalogError::PriceTooHigh(id.clone()));
            }
        }
        Ok(Self {
            entries,
            currency_code,
        })
    }

    /// Parse a catalog JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the document is not an object of
    /// entries, or a price error if any price is out of range.
    pub fn from_json_str(json: &str, currency_code: CurrencyCode) -> Result<Self, CatalogError> {
        let entries: IndexMap<ProductId, CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries, currency_code)
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// Whether the catalog knows this product.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Currency all catalog prices are expressed in.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &CatalogEntry)> {
        self.entries.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
