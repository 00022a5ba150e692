//! Bag
//!
//! Shopping bag state and checkout workflow for a storefront: line items with
//! quantities, derived subtotal and total with flat shipping, and a checkout
//! coordinator that hands the total to an external payment capability.

pub mod basket;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod items;
pub mod observability;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod store;
pub mod summary;
