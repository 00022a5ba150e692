//! Items

use std::fmt;

use rusty_money::{Money, iso::Currency};

/// Identifier of a line item within a cart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineItemId(String);

impl LineItemId {
    /// Creates a new line item identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LineItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One product entry in the cart with its own quantity and price.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    id: LineItemId,
    name: String,
    variant: String,
    unit_price: Money<'static, Currency>,
    quantity: u32,
}

impl LineItem {
    /// Creates a new line item.
    ///
    /// Quantity and price are validated when the item is placed in a [`Cart`](crate::basket::Cart).
    pub fn new(
        id: impl Into<LineItemId>,
        name: impl Into<String>,
        variant: impl Into<String>,
        unit_price: Money<'static, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variant: variant.into(),
            unit_price,
            quantity,
        }
    }

    /// Returns the item identifier
    pub fn id(&self) -> &LineItemId {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variant description (size, colour)
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Returns the price of a single unit
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Returns the quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Adds one to the quantity.
    ///
    /// Returns `true` if the quantity changed. A quantity of `u32::MAX` is left as is.
    pub(crate) fn increment(&mut self) -> bool {
        match self.quantity.checked_add(1) {
            Some(quantity) => {
                self.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Removes one from the quantity, never going below one.
    ///
    /// Returns `true` if the quantity changed.
    pub(crate) fn decrement(&mut self) -> bool {
        if self.quantity > 1 {
            self.quantity -= 1;
            true
        } else {
            false
        }
    }
}
