//! Summary

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    basket::Cart,
    pricing::{TotalPriceError, line_total},
};

/// Errors that can occur when rendering a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating totals from cart items.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Derived totals for a cart at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary {
    subtotal: Money<'static, Currency>,
    item_count: u64,
    shipping: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl CartSummary {
    /// Create a new summary with the given details.
    pub fn new(
        subtotal: Money<'static, Currency>,
        item_count: u64,
        shipping: Money<'static, Currency>,
        total: Money<'static, Currency>,
    ) -> Self {
        Self {
            subtotal,
            item_count,
            shipping,
            total,
        }
    }

    /// Sum of extended prices, excluding shipping
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Sum of quantities across every line item
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Flat shipping cost
    pub fn shipping(&self) -> Money<'static, Currency> {
        self.shipping
    }

    /// Subtotal plus shipping
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Writes the cart line items and this summary as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total overflows or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
        if cart.is_empty() {
            writeln!(out, "\nYour bag is empty.\n").map_err(|_err| SummaryError::IO)?;
        } else {
            write_items_table(&mut out, cart)?;
        }

        let item_label = if self.item_count == 1 { "item" } else { "items" };

        let lines = [
            (
                format!(" Subtotal ({} {item_label}):", self.item_count),
                format!("{}", self.subtotal),
            ),
            (" Shipping:".to_string(), format!("{}", self.shipping)),
            (" Total:".to_string(), format!("{}", self.total)),
        ];

        let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in lines {
            writeln!(out, "{label:<label_width$} {value:>value_width$}")
                .map_err(|_err| SummaryError::IO)?;
        }

        Ok(())
    }
}

fn write_items_table(out: &mut impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Variant", "Price", "Qty", "Line Total"]);

    for (idx, item) in cart.iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            item.name().to_string(),
            item.variant().to_string(),
            format!("{}", item.unit_price()),
            item.quantity().to_string(),
            format!("{}", line_total(item)?),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::items::LineItem;

    use super::*;

    fn usd(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, USD)
    }

    #[test]
    fn accessors_return_values_from_constructor() {
        let summary = CartSummary::new(usd(26182), 6, usd(1500), usd(27682));

        assert_eq!(summary.subtotal(), usd(26182));
        assert_eq!(summary.item_count(), 6);
        assert_eq!(summary.shipping(), usd(1500));
        assert_eq!(summary.total(), usd(27682));
    }

    #[test]
    fn write_to_renders_items_and_totals() -> TestResult {
        let cart = Cart::with_items(
            [
                LineItem::new("leggings", "Seamless Leggings", "Black / M", usd(4599), 2),
                LineItem::new("hoodie", "Training Hoodie", "Grey / L", usd(5299), 1),
            ],
            usd(1500),
        )?;

        let mut out = Vec::new();

        cart.summary()?.write_to(&mut out, &cart)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Seamless Leggings"), "{rendered}");
        assert!(rendered.contains("Black / M"), "{rendered}");
        assert!(rendered.contains("Training Hoodie"), "{rendered}");
        assert!(rendered.contains("Subtotal (3 items):"), "{rendered}");
        assert!(rendered.contains(&format!("{}", usd(14497))), "{rendered}");
        assert!(rendered.contains(&format!("{}", usd(15997))), "{rendered}");

        Ok(())
    }

    #[test]
    fn write_to_renders_empty_bag() -> TestResult {
        let cart = Cart::new(usd(1500))?;
        let mut out = Vec::new();

        cart.summary()?.write_to(&mut out, &cart)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Your bag is empty."), "{rendered}");
        assert!(rendered.contains("Subtotal (0 items):"), "{rendered}");
        assert!(!rendered.contains("Line Total"), "{rendered}");

        Ok(())
    }
}
