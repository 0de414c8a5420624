//! Cart
//!
//! A cart is an immutable snapshot: every mutation returns a new cart and
//! leaves the original untouched, so observers holding an older snapshot
//! never see it change underneath them.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::items::{CartEntry, LineItem};

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An entry's currency differs from the cart currency (entry currency, cart currency).
    #[error("Entry has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    lines: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add an entry, merging it into an existing line with the same key.
    ///
    /// A merged line keeps its original unit price and display name and only
    /// grows in quantity. An entry for a new key is appended. Entries with a
    /// zero quantity never create a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the entry is priced in a
    /// different currency than the cart.
    pub fn upsert(&self, entry: CartEntry<'a>) -> Result<Self, CartError> {
        let entry_currency = entry.unit_price.currency();

        if entry_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                entry_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let key = entry.key();

        let lines = if let Some(pos) = self.position(key.as_str()) {
            debug!(%key, added = entry.quantity, "merging cart line");

            self.lines
                .iter()
                .enumerate()
                .map(|(idx, line)| {
                    if idx == pos {
                        line.with_quantity(line.quantity().saturating_add(entry.quantity))
                    } else {
                        line.clone()
                    }
                })
                .collect()
        } else if entry.quantity == 0 {
            self.lines.clone()
        } else {
            debug!(%key, quantity = entry.quantity, "appending cart line");

            let mut lines = Vec::with_capacity(self.lines.len() + 1);
            lines.extend(self.lines.iter().cloned());
            lines.push(LineItem::from(entry));
            lines
        };

        Ok(Cart {
            lines,
            currency: self.currency,
        })
    }

    /// Replace the quantity of the line with `key`.
    ///
    /// Negative quantities are treated as zero and a line at zero is dropped.
    /// An unknown key leaves the cart unchanged.
    #[must_use]
    pub fn set_quantity(&self, key: &str, quantity: i64) -> Self {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                if line.key().as_str() == key {
                    if quantity == 0 {
                        debug!(%key, "dropping cart line at zero quantity");
                        return None;
                    }

                    Some(line.with_quantity(quantity))
                } else {
                    Some(line.clone())
                }
            })
            .collect();

        Cart {
            lines,
            currency: self.currency,
        }
    }

    /// Remove the line with `key`. An unknown key leaves the cart unchanged.
    #[must_use]
    pub fn remove(&self, key: &str) -> Self {
        Cart {
            lines: self
                .lines
                .iter()
                .filter(|line| line.key().as_str() != key)
                .cloned()
                .collect(),
            currency: self.currency,
        }
    }

    /// Calculate the subtotal of the cart in integer minor units.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor = self
            .lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.total_minor()));

        Money::from_minor(minor, self.currency)
    }

    /// Get the line with `key`, if present.
    pub fn get(&self, key: &str) -> Option<&LineItem<'a>> {
        self.lines.iter().find(|line| line.key().as_str() == key)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.iter()
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.key().as_str() == key)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{MXN, USD};
    use testresult::TestResult;

    use crate::variants::Variant;

    use super::*;

    fn entry<'a>(id: &str, variant: Variant, price: i64, quantity: u32) -> CartEntry<'a> {
        CartEntry {
            product_id: id.to_string(),
            display_name: id.to_uppercase(),
            variant,
            unit_price: Money::from_minor(price, MXN),
            quantity,
        }
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(MXN);

        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.currency(), MXN);
    }

    #[test]
    fn upsert_appends_new_line() -> TestResult {
        let cart = Cart::new(MXN).upsert(entry("pep", Variant::Slice, 170, 1))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("pep-slice").map(LineItem::quantity), Some(1));

        Ok(())
    }

    #[test]
    fn upsert_merges_quantity_and_keeps_first_price() -> TestResult {
        let mut second = entry("pep", Variant::Slice, 999, 2);
        second.display_name = "Renamed".to_string();

        let cart = Cart::new(MXN)
            .upsert(entry("pep", Variant::Slice, 170, 1))?
            .upsert(second)?;

        let line = cart.get("pep-slice").ok_or("missing line")?;

        assert_eq!(cart.len(), 1);
        assert_eq!(line.quantity(), 3);
        assert_eq!(line.unit_price(), &Money::from_minor(170, MXN));
        assert_eq!(line.display_name(), "PEP");

        Ok(())
    }

    #[test]
    fn upsert_does_not_mutate_input() -> TestResult {
        let before = Cart::new(MXN).upsert(entry("pep", Variant::Slice, 170, 1))?;
        let snapshot = before.clone();

        let after = before.upsert(entry("pep", Variant::Slice, 170, 4))?;

        assert_eq!(before, snapshot);
        assert_eq!(after.get("pep-slice").map(LineItem::quantity), Some(5));

        Ok(())
    }

    #[test]
    fn upsert_rejects_other_currency() {
        let mut foreign = entry("pep", Variant::Slice, 170, 1);
        foreign.unit_price = Money::from_minor(170, USD);

        assert_eq!(
            Cart::new(MXN).upsert(foreign),
            Err(CartError::CurrencyMismatch(
                USD.iso_alpha_code,
                MXN.iso_alpha_code
            ))
        );
    }

    #[test]
    fn upsert_with_zero_quantity_adds_nothing() -> TestResult {
        let cart = Cart::new(MXN).upsert(entry("pep", Variant::Slice, 170, 0))?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_replaces_quantity() -> TestResult {
        let cart = Cart::new(MXN)
            .upsert(entry("pep", Variant::Slice, 170, 1))?
            .set_quantity("pep-slice", 7);

        assert_eq!(cart.get("pep-slice").map(LineItem::quantity), Some(7));

        Ok(())
    }

    #[test]
    fn set_quantity_negative_drops_line() -> TestResult {
        let cart = Cart::new(MXN)
            .upsert(entry("pep", Variant::Slice, 170, 1))?
            .upsert(entry("nap", Variant::Full, 320, 1))?
            .set_quantity("pep-slice", -3);

        assert_eq!(cart.len(), 1);
        assert!(cart.get("pep-slice").is_none());

        Ok(())
    }

    #[test]
    fn set_quantity_unknown_key_is_noop() -> TestResult {
        let cart = Cart::new(MXN).upsert(entry("pep", Variant::Slice, 170, 2))?;

        assert_eq!(cart.set_quantity("nope-full", 0), cart);

        Ok(())
    }

    #[test]
    fn remove_drops_only_matching_line() -> TestResult {
        let cart = Cart::new(MXN)
            .upsert(entry("pep", Variant::Slice, 170, 1))?
            .upsert(entry("pep", Variant::Full, 300, 1))?;

        let removed = cart.remove("pep-slice");

        assert_eq!(removed.len(), 1);
        assert!(removed.get("pep-full").is_some());
        assert_eq!(cart.remove("missing"), cart);

        Ok(())
    }

    #[test]
    fn subtotal_sums_lines() -> TestResult {
        let cart = Cart::new(MXN)
            .upsert(entry("a", Variant::Slice, 100, 1))?
            .upsert(entry("b", Variant::Slice, 50, 3))?;

        assert_eq!(cart.subtotal(), Money::from_minor(250, MXN));
        assert_eq!(cart.unit_count(), 4);

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() {
        assert_eq!(Cart::new(MXN).subtotal(), Money::from_minor(0, MXN));
    }

    #[test]
    fn iteration_preserves_insertion_order() -> TestResult {
        let cart = Cart::new(MXN)
            .upsert(entry("chi", Variant::Full, 380, 1))?
            .upsert(entry("ny", Variant::Slice, 190, 1))?
            .upsert(entry("chi", Variant::Full, 380, 1))?;

        let keys: Vec<&str> = cart.iter().map(|line| line.key().as_str()).collect();

        assert_eq!(keys, ["chi-full", "ny-slice"]);

        Ok(())
    }
}
