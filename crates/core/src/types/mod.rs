//! Core types for Thriftkids.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod price;
pub mod quantity;

pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price};
pub use quantity::Quantity;
