//! `marketlens-baskets` — groups raw line items into per-transaction baskets.
//!
//! The [`Basket`] is the shared abstraction every basket-level analytic
//! consumes; it is built fresh per request and never mutated once built.

pub mod basket;
pub mod lookup;

pub use basket::{Basket, BasketBuild, build_baskets};
pub use lookup::{TransactionLine, transaction_lookup};
