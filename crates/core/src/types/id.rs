//! Product identifiers.
//!
//! Product ids are opaque strings chosen by whoever maintains the catalog
//! (e.g. `"sku1"`, `"tee-blue-4t"`). The same id keys both the cart and the
//! catalog, so it is the join column for every rendered line item.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input is empty or whitespace only.
    #[error("product id cannot be empty")]
    Empty,
}

/// A catalog product identifier.
///
/// ## Constraints
///
/// - Not empty after trimming surrounding whitespace
/// - Stored trimmed
///
/// ## Examples
///
/// ```
/// use thriftkids_core::ProductId;
///
/// let id = ProductId::parse(" sku1 ").unwrap();
/// assert_eq!(id.as_str(), "sku1");
///
/// assert!(ProductId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ProductIdError::Empty`] if the input is blank.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by `ProductId` be queried with a plain `&str`.
impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id = ProductId::parse("  sku1\n").unwrap();
        assert_eq!(id.as_str(), "sku1");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse(" \t "), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_serde_is_a_plain_string() {
        let id = ProductId::parse("sku1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sku1\"");

        let parsed: ProductId = serde_json::from_str("\"sku1\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<ProductId>("\"  \"").is_err());
    }
}
