//! Catalog
//!
//! The menu a cart is filled from. A catalog is built once from
//! configuration and passed explicitly to whoever needs prices.

use std::io;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    items::CartEntry,
    products::{Product, ProductKey},
    variants::Variant,
};

/// Errors related to catalog construction and lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No product with this id exists.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The product is not sold in the requested variant.
    #[error("Product {0} has no {1} price")]
    MissingVariant(String, Variant),

    /// A product with this id was already added.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product price is in a different currency than the catalog.
    #[error("Product {product} is priced in {actual}, but catalog uses {expected}")]
    CurrencyMismatch {
        /// Product id
        product: String,
        /// Catalog currency
        expected: &'static str,
        /// Offending price currency
        actual: &'static str,
    },

    /// A product price is negative.
    #[error("Product {0} has a negative price")]
    NegativePrice(String),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    ids: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            ids: FxHashMap::default(),
            currency,
        }
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the id is already taken, or a price is
    /// negative or in a different currency than the catalog.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        if self.ids.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        for price in product.prices.values() {
            let currency = price.currency();

            if currency != self.currency {
                return Err(CatalogError::CurrencyMismatch {
                    product: product.id,
                    expected: self.currency.iso_alpha_code,
                    actual: currency.iso_alpha_code,
                });
            }

            if price.to_minor_units() < 0 {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.ids.insert(id, key);

        Ok(key)
    }

    /// Look up a product by its catalog id.
    pub fn get(&self, id: &str) -> Option<&Product<'a>> {
        self.ids.get(id).and_then(|key| self.products.get(*key))
    }

    /// Look up a product by its key.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Build a cart entry priced from the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownProduct`]: no product has this id.
    /// - [`CatalogError::MissingVariant`]: the product has no price for `variant`.
    pub fn entry(
        &self,
        id: &str,
        variant: Variant,
        quantity: u32,
    ) -> Result<CartEntry<'a>, CatalogError> {
        let product = self
            .get(id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))?;

        let unit_price = product
            .price(variant)
            .ok_or_else(|| CatalogError::MissingVariant(id.to_string(), variant))?;

        Ok(CartEntry {
            product_id: product.id.clone(),
            display_name: product.name.clone(),
            variant,
            unit_price,
            quantity,
        })
    }

    /// Iterate over products in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.values()
    }

    /// Get the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the menu as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Id", "Name", "Slice", "Full", "Description"]);

        for product in self.iter() {
            let price_cell = |variant| {
                product
                    .price(variant)
                    .map_or_else(|| "-".to_string(), |price| price.to_string())
            };

            builder.push_record([
                product.id.clone(),
                product.name.clone(),
                price_cell(Variant::Slice),
                price_cell(Variant::Full),
                product.description.clone(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rusty_money::{
        Money,
        iso::{MXN, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn peperoni<'a>() -> Product<'a> {
        Product {
            id: "pep".to_string(),
            name: "Peperoni".to_string(),
            description: "Crispy cupped pepperoni.".to_string(),
            prices: BTreeMap::from([
                (Variant::Slice, Money::from_minor(17_000, MXN)),
                (Variant::Full, Money::from_minor(30_000, MXN)),
            ]),
        }
    }

    #[test]
    fn insert_and_lookup_by_id() -> TestResult {
        let mut catalog = Catalog::new(MXN);
        let key = catalog.insert(peperoni())?;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("pep").map(|p| p.name.as_str()), Some("Peperoni"));
        assert_eq!(catalog.product(key), catalog.get("pep"));

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_id() -> TestResult {
        let mut catalog = Catalog::new(MXN);
        catalog.insert(peperoni())?;

        assert_eq!(
            catalog.insert(peperoni()),
            Err(CatalogError::DuplicateProduct("pep".to_string()))
        );

        Ok(())
    }

    #[test]
    fn insert_rejects_foreign_currency() {
        let mut catalog = Catalog::new(USD);

        assert!(matches!(
            catalog.insert(peperoni()),
            Err(CatalogError::CurrencyMismatch { product, .. }) if product == "pep"
        ));
    }

    #[test]
    fn insert_rejects_negative_price() {
        let mut catalog = Catalog::new(MXN);
        let mut product = peperoni();
        product
            .prices
            .insert(Variant::Slice, Money::from_minor(-1, MXN));

        assert_eq!(
            catalog.insert(product),
            Err(CatalogError::NegativePrice("pep".to_string()))
        );
    }

    #[test]
    fn entry_uses_catalog_price() -> TestResult {
        let mut catalog = Catalog::new(MXN);
        catalog.insert(peperoni())?;

        let entry = catalog.entry("pep", Variant::Full, 2)?;

        assert_eq!(entry.product_id, "pep");
        assert_eq!(entry.display_name, "Peperoni");
        assert_eq!(entry.unit_price, Money::from_minor(30_000, MXN));
        assert_eq!(entry.quantity, 2);

        Ok(())
    }

    #[test]
    fn entry_errors_for_unknown_product_and_variant() -> TestResult {
        let mut catalog = Catalog::new(MXN);
        let mut product = peperoni();
        product.prices.remove(&Variant::Slice);
        catalog.insert(product)?;

        assert_eq!(
            catalog.entry("nap", Variant::Full, 1),
            Err(CatalogError::UnknownProduct("nap".to_string()))
        );
        assert_eq!(
            catalog.entry("pep", Variant::Slice, 1),
            Err(CatalogError::MissingVariant("pep".to_string(), Variant::Slice))
        );

        Ok(())
    }

    #[test]
    fn write_to_lists_products() -> TestResult {
        let mut catalog = Catalog::new(MXN);
        catalog.insert(peperoni())?;

        let mut out = Vec::new();
        catalog.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Peperoni"));
        assert!(rendered.contains("pep"));

        Ok(())
    }
}
