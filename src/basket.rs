//! Basket

use std::slice::Iter;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    items::{LineItem, LineItemId},
    pricing::{self, TotalPriceError},
    summary::CartSummary,
};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum BasketError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Two items share the same identifier.
    #[error("Duplicate line item id: {0}")]
    DuplicateId(LineItemId),

    /// An item was created with a quantity of zero.
    #[error("Line item {0} has a quantity of zero")]
    ZeroQuantity(LineItemId),

    /// An item or the shipping cost has a negative price.
    #[error("Negative price for {0}")]
    NegativePrice(String),
}

/// Shopping cart: ordered line items plus a flat shipping cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    shipping: Money<'static, Currency>,
}

impl Cart {
    /// Create a new empty cart with the given flat shipping cost.
    ///
    /// The cart currency is the shipping currency.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::NegativePrice`] if the shipping cost is negative.
    pub fn new(shipping: Money<'static, Currency>) -> Result<Self, BasketError> {
        Self::with_items(Vec::new(), shipping)
    }

    /// Create a new cart with the given items and flat shipping cost.
    ///
    /// # Errors
    ///
    /// Returns a `BasketError` if an item has a different currency to the
    /// shipping cost, two items share an id, an item has a zero quantity, or
    /// any price is negative.
    pub fn with_items(
        items: impl Into<Vec<LineItem>>,
        shipping: Money<'static, Currency>,
    ) -> Result<Self, BasketError> {
        let items = items.into();
        let currency = shipping.currency();

        if shipping.to_minor_units() < 0 {
            return Err(BasketError::NegativePrice("shipping".to_string()));
        }

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.unit_price().currency();

            if item_currency != currency {
                return Err(BasketError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if item.quantity() == 0 {
                return Err(BasketError::ZeroQuantity(item.id().clone()));
            }

            if item.unit_price().to_minor_units() < 0 {
                return Err(BasketError::NegativePrice(item.id().to_string()));
            }

            if items.iter().take(i).any(|other| other.id() == item.id()) {
                return Err(BasketError::DuplicateId(item.id().clone()));
            }

            Ok(())
        })?;

        Ok(Cart { items, shipping })
    }

    /// Adds one to the quantity of the item with the given id.
    ///
    /// Unknown ids are ignored, as is an item already at `u32::MAX`. Returns
    /// `true` if the cart changed.
    pub fn increment(&mut self, id: &LineItemId) -> bool {
        let Some(item) = self.find_mut(id) else {
            debug!(item_id = %id, "increment ignored: unknown line item");
            return false;
        };

        item.increment()
    }

    /// Removes one from the quantity of the item with the given id.
    ///
    /// The quantity floor is one: decrementing never removes an item. Unknown
    /// ids are ignored. Returns `true` if the cart changed.
    pub fn decrement(&mut self, id: &LineItemId) -> bool {
        let Some(item) = self.find_mut(id) else {
            debug!(item_id = %id, "decrement ignored: unknown line item");
            return false;
        };

        item.decrement()
    }

    /// Removes every item from the cart. Returns `true` if the cart changed.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }

        self.items.clear();

        true
    }

    /// Calculate the subtotal of the cart, excluding shipping.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the amount overflows minor units.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        pricing::subtotal(&self.items, self.currency())
    }

    /// Calculate the total of the cart: subtotal plus shipping.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the amount overflows minor units.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        Ok(self.subtotal()?.add(self.shipping)?)
    }

    /// Sum of the quantities of every line item.
    pub fn total_item_count(&self) -> u64 {
        pricing::item_count(&self.items)
    }

    /// Derive a snapshot of subtotal, item count, shipping and total.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if the amount overflows minor units.
    pub fn summary(&self) -> Result<CartSummary, TotalPriceError> {
        let subtotal = self.subtotal()?;
        let total = subtotal.add(self.shipping)?;

        Ok(CartSummary::new(
            subtotal,
            self.total_item_count(),
            self.shipping,
            total,
        ))
    }

    /// Get the item with the given id.
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get the number of line items (not units) in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the flat shipping cost.
    pub fn shipping(&self) -> Money<'static, Currency> {
        self.shipping
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.shipping.currency()
    }

    fn find_mut(&mut self, id: &LineItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
