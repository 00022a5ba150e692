//! Cart Store
//!
//! Shared, observable owner of the authoritative [`Cart`]. Every mutation is
//! serialized through the underlying watch channel, and subscribers are only
//! woken when a mutation actually changes the cart.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use crate::{
    basket::Cart,
    items::LineItemId,
    pricing::TotalPriceError,
    summary::CartSummary,
};

/// Cloneable handle to the in-memory cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<Cart>>,
}

impl CartStore {
    /// Create a store seeded with the given cart.
    pub fn new(cart: Cart) -> Self {
        Self {
            state: Arc::new(watch::Sender::new(cart)),
        }
    }

    /// Adds one to the quantity of the given item.
    ///
    /// Unknown ids are ignored. Returns `true` if the cart changed.
    pub fn increment(&self, id: &LineItemId) -> bool {
        let changed = self.state.send_if_modified(|cart| cart.increment(id));

        trace!(item_id = %id, changed, "increment");

        changed
    }

    /// Removes one from the quantity of the given item, never below one.
    ///
    /// Unknown ids are ignored. Returns `true` if the cart changed.
    pub fn decrement(&self, id: &LineItemId) -> bool {
        let changed = self.state.send_if_modified(|cart| cart.decrement(id));

        trace!(item_id = %id, changed, "decrement");

        changed
    }

    /// Empties the cart. Returns `true` if the cart changed.
    pub fn clear(&self) -> bool {
        let changed = self.state.send_if_modified(Cart::clear);

        trace!(changed, "clear");

        changed
    }

    /// Derived subtotal, item count, shipping and total for the current cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the amount overflows minor units.
    pub fn summary(&self) -> Result<CartSummary, TotalPriceError> {
        self.state.borrow().summary()
    }

    /// Clone of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver starts with the current cart marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }
}

impl From<Cart> for CartStore {
    fn from(cart: Cart) -> Self {
        Self::new(cart)
    }
}
