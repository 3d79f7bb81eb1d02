//! Positive line-item quantities.

use core::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Number of units of one product in the cart. Always at least 1.
///
/// A cart line whose quantity would drop to zero is removed rather than
/// stored, so zero is not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit; the fallback for missing or unusable quantity input.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, or `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Interpret a raw quantity field from an add-to-cart form.
    ///
    /// Missing, blank, non-numeric, zero, negative, and out-of-range input
    /// all fall back to [`Quantity::ONE`].
    ///
    /// ```
    /// use thriftkids_core::Quantity;
    ///
    /// assert_eq!(Quantity::parse_or_default(Some(" 3 ")).get(), 3);
    /// assert_eq!(Quantity::parse_or_default(Some("abc")).get(), 1);
    /// assert_eq!(Quantity::parse_or_default(Some("-2")).get(), 1);
    /// assert_eq!(Quantity::parse_or_default(None).get(), 1);
    /// ```
    #[must_use]
    pub fn parse_or_default(input: Option<&str>) -> Self {
        input
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .and_then(Self::new)
            .unwrap_or(Self::ONE)
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities, pinning at `u32::MAX` instead of overflowing.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.get()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.get()
    }
}
