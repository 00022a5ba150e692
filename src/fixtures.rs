//! Fixtures
//!
//! Seed carts loaded from YAML:
//!
//! ```yaml
//! shipping: "15.00 USD"
//! items:
//!   - id: leggings-black-m
//!     name: Seamless Leggings
//!     variant: Black / M
//!     price: "45.99 USD"
//!     quantity: 2
//! ```

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    basket::{BasketError, Cart},
    items::LineItem,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Basket(#[from] BasketError),
}

/// Cart fixture file
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Flat shipping cost (e.g., "15.00 USD"); sets the cart currency
    pub shipping: String,

    /// Line items in display order
    #[serde(default)]
    pub items: Vec<LineItemFixture>,
}

/// Line Item Fixture
#[derive(Debug, Deserialize)]
pub struct LineItemFixture {
    /// Line item id
    pub id: String,

    /// Product name
    pub name: String,

    /// Size / colour description
    #[serde(default)]
    pub variant: String,

    /// Unit price (e.g., "45.99 USD")
    pub price: String,

    /// Quantity, defaults to one
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl CartFixture {
    /// Parse a cart fixture from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Read a cart fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }
}

impl TryFrom<LineItemFixture> for LineItem {
    type Error = FixtureError;

    fn try_from(fixture: LineItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(LineItem::new(
            fixture.id,
            fixture.name,
            fixture.variant,
            Money::from_minor(minor_units, currency),
            fixture.quantity,
        ))
    }
}

impl TryFrom<CartFixture> for Cart {
    type Error = FixtureError;

    fn try_from(fixture: CartFixture) -> Result<Self, Self::Error> {
        let (shipping_minor, currency) = parse_price(&fixture.shipping)?;

        let items = fixture
            .items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::with_items(
            items,
            Money::from_minor(shipping_minor, currency),
        )?)
    }
}

/// Load a cart from a YAML fixture file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a price is invalid,
/// or the items do not form a valid cart.
pub fn load_cart(path: impl AsRef<Path>) -> Result<Cart, FixtureError> {
    Cart::try_from(CartFixture::from_file(path)?)
}

/// Parse price string (e.g., "45.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = Decimal::from(10_i64.pow(currency.exponent))
        .checked_mul(amount)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
