//! Storefront
//!
//! Menu, cart and checkout core for a single-page pizzeria storefront: carts
//! are immutable snapshots priced in integer minor units, delivery is a flat
//! fee waived above a threshold, and checkout hands a validated order summary
//! to a pluggable notifier.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod variants;
