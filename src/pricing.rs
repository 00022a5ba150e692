//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while calculating line or cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// The amount no longer fits in minor units.
    #[error("price overflowed while calculating totals")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the extended price of a line item (unit price × quantity).
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
pub fn line_total(item: &LineItem) -> Result<Money<'static, Currency>, TotalPriceError> {
    let minor = item
        .unit_price()
        .to_minor_units()
        .checked_mul(i64::from(item.quantity()))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor, item.unit_price().currency()))
}

/// Calculates the subtotal of a list of line items in the given currency.
///
/// An empty list totals zero.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: An extended price did not fit in minor units.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn subtotal(
    items: &[LineItem],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(line_total(item)?)?)
        })
}

/// Sums the quantities of a list of line items.
pub fn item_count(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity())).sum()
}
