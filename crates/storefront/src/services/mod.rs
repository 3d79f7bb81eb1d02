//! Business logic services for storefront.
//!
//! Services sit between the route handlers and the cart store: each one is a
//! single load, mutate, save sequence over a [`crate::cart_store::CartStore`],
//! with the cart rules themselves living in `thriftkids-core`.

pub mod cart;
