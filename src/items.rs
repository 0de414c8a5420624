//! Items

use std::{borrow::Borrow, fmt};

use rusty_money::{Money, iso::Currency};

use crate::variants::Variant;

/// Identity of a cart line: product id and variant joined by `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey(String);

impl LineKey {
    /// Build the key for a product and variant.
    pub fn new(product_id: &str, variant: Variant) -> Self {
        LineKey(format!("{product_id}-{variant}"))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LineKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request to add a product to a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry<'a> {
    /// Catalog id of the product
    pub product_id: String,

    /// Name shown to the customer
    pub display_name: String,

    /// Chosen variant
    pub variant: Variant,

    /// Price of a single unit at the time of adding
    pub unit_price: Money<'a, Currency>,

    /// Number of units to add
    pub quantity: u32,
}

impl CartEntry<'_> {
    /// Key of the line this entry lands on.
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.product_id, self.variant)
    }
}

/// One row in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    key: LineKey,
    product_id: String,
    display_name: String,
    variant: Variant,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Line key (product id + variant)
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// Catalog id of the product
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Name shown to the customer
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Chosen variant
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Unit price fixed when the line was first added
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Number of units on this line, always positive
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line total in minor units.
    pub fn total_minor(&self) -> i64 {
        self.unit_price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity))
    }

    /// Line total (`unit_price * quantity`).
    pub fn total(&self) -> Money<'a, Currency> {
        Money::from_minor(self.total_minor(), self.unit_price.currency())
    }

    pub(crate) fn with_quantity(&self, quantity: u32) -> Self {
        LineItem {
            quantity,
            ..self.clone()
        }
    }
}

impl<'a> From<CartEntry<'a>> for LineItem<'a> {
    fn from(entry: CartEntry<'a>) -> Self {
        LineItem {
            key: entry.key(),
            product_id: entry.product_id,
            display_name: entry.display_name,
            variant: entry.variant,
            unit_price: entry.unit_price,
            quantity: entry.quantity,
        }
    }
}
