//! Thriftkids Core - Cart domain library.
//!
//! This crate provides the cart state machine shared by every Thriftkids
//! component:
//! - `storefront` - Product listing, cart review, and checkout pages
//! - `cli` - Command-line tools for migrations and catalog validation
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no session
//! access, no HTTP. Everything that touches persisted state takes a [`Cart`]
//! value in and hands a [`Cart`] value back, so the whole state machine is
//! testable without a browser or a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, quantities, and prices
//! - [`cart`] - The persisted cart mapping and its mutations
//! - [`catalog`] - Read-only product catalog consumed by rendering
//! - [`summary`] - Line items, grand total, and badge count
//! - [`checkout`] - Checkout form validation and the review/submitted states

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod summary;
pub mod types;

pub use cart::{CART_STORAGE_KEY, Cart, CartShapeError};
pub use catalog::{Catalog, CatalogEntry, CatalogError, MAX_UNIT_PRICE};
pub use checkout::{
    Checkout, CheckoutError, CheckoutForm, CheckoutState, FieldError, FieldErrors, ValidatedOrder,
};
pub use summary::{CartSummary, LineItem, compute_grand_total, compute_line_items};
pub use types::*;
