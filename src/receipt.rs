//! Receipt

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
    cart::Cart,
    pricing::{DeliveryPolicy, PricingError, Totals, price},
    variants::Variant,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error pricing the cart.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One priced line on a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Units ordered
    pub quantity: u32,

    /// Product name
    pub name: String,

    /// Chosen variant
    pub variant: Variant,

    /// Price per unit
    pub unit_price: Money<'a, Currency>,

    /// `unit_price * quantity`
    pub line_total: Money<'a, Currency>,
}

/// Priced snapshot of a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt<'a> {
    lines: Vec<ReceiptLine<'a>>,
    totals: Totals<'a>,
}

impl<'a> Receipt<'a> {
    /// Price a cart under a delivery policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the cart and policy currencies differ.
    pub fn from_cart(cart: &Cart<'a>, policy: &DeliveryPolicy<'a>) -> Result<Self, ReceiptError> {
        let totals = price(cart, policy)?;

        let lines = cart
            .iter()
            .map(|line| ReceiptLine {
                quantity: line.quantity(),
                name: line.display_name().to_string(),
                variant: line.variant(),
                unit_price: *line.unit_price(),
                line_total: line.total(),
            })
            .collect();

        Ok(Self { lines, totals })
    }

    /// Priced lines in cart order
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Subtotal, delivery and total
    pub fn totals(&self) -> &Totals<'a> {
        &self.totals
    }

    /// Total cost before delivery
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.totals.subtotal
    }

    /// Delivery fee
    pub fn delivery(&self) -> Money<'a, Currency> {
        self.totals.delivery
    }

    /// Total amount due
    pub fn total(&self) -> Money<'a, Currency> {
        self.totals.total
    }

    /// Writes the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Size", "Unit Price", "Line Total"]);

        for line in &self.lines {
            builder.push_record([
                format!("{:>3} x", line.quantity),
                line.name.clone(),
                line.variant.label().to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.line_total),
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
        table.modify(Columns::new(3..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        let delivery = if self.totals.free_delivery() && !self.lines.is_empty() {
            "free".to_string()
        } else {
            self.totals.delivery.to_string()
        };

        let rows = [
            ("Subtotal:", self.totals.subtotal.to_string()),
            ("Delivery:", delivery),
            ("Total:", self.totals.total.to_string()),
        ];

        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, " {label:<10}{value:>value_width$}").map_err(|_err| ReceiptError::IO)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{MXN, USD};
    use testresult::TestResult;

    use crate::items::CartEntry;

    use super::*;

    fn cart<'a>() -> TestResult<Cart<'a>> {
        let entry = |id: &str, name: &str, variant, price, quantity| CartEntry {
            product_id: id.to_string(),
            display_name: name.to_string(),
            variant,
            unit_price: Money::from_minor(price, MXN),
            quantity,
        };

        Ok(Cart::new(MXN)
            .upsert(entry("pep", "Peperoni", Variant::Slice, 17_000, 2))?
            .upsert(entry("nap", "Napolitana", Variant::Full, 32_000, 1))?)
    }

    #[test]
    fn from_cart_prices_lines_and_totals() -> TestResult {
        let receipt = Receipt::from_cart(&cart()?, &DeliveryPolicy::reference(MXN))?;

        assert_eq!(receipt.lines().len(), 2);
        assert_eq!(
            receipt.lines().first().map(|line| line.line_total),
            Some(Money::from_minor(34_000, MXN))
        );
        assert_eq!(receipt.subtotal(), Money::from_minor(66_000, MXN));
        assert_eq!(receipt.delivery(), Money::from_minor(0, MXN));
        assert_eq!(receipt.total(), Money::from_minor(66_000, MXN));

        Ok(())
    }

    #[test]
    fn from_cart_errors_on_policy_currency_mismatch() -> TestResult {
        let result = Receipt::from_cart(&cart()?, &DeliveryPolicy::reference(USD));

        assert!(matches!(
            result,
            Err(ReceiptError::Pricing(PricingError::CurrencyMismatch { .. }))
        ));

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_and_totals() -> TestResult {
        let receipt = Receipt::from_cart(&cart()?, &DeliveryPolicy::reference(MXN))?;

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Peperoni"));
        assert!(rendered.contains("Whole pizza"));
        assert!(rendered.contains("Subtotal:"));
        assert!(rendered.contains("free"));

        Ok(())
    }

    #[test]
    fn write_to_shows_fee_below_threshold() -> TestResult {
        let cart = cart()?.remove("nap-full");
        let receipt = Receipt::from_cart(&cart, &DeliveryPolicy::reference(MXN))?;

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert_eq!(receipt.delivery(), Money::from_minor(3_000, MXN));
        assert!(!rendered.contains("free"));

        Ok(())
    }
}
