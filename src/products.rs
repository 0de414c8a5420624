//! Products

use std::collections::BTreeMap;

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::variants::Variant;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Catalog id, unique within a catalog (e.g. `pep`)
    pub id: String,

    /// Product name
    pub name: String,

    /// Short description shown on the menu
    pub description: String,

    /// Price per variant
    pub prices: BTreeMap<Variant, Money<'a, Currency>>,
}

impl<'a> Product<'a> {
    /// Price of the given variant, if the product is sold in it.
    pub fn price(&self, variant: Variant) -> Option<Money<'a, Currency>> {
        self.prices.get(&variant).copied()
    }
}
