//! Command-line arguments for the `storefront` binary

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError},
    checkout::{CardDetails, Contact, OrderDetails, Payment},
    variants::{UnknownVariant, Variant},
};

/// Errors from interpreting command-line input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// An `--item` value is not `PRODUCT:VARIANT[:QTY]`.
    #[error("Invalid item '{0}', expected PRODUCT:VARIANT[:QTY]")]
    InvalidItem(String),

    /// Unknown variant in an `--item` value.
    #[error(transparent)]
    Variant(#[from] UnknownVariant),

    /// The item does not exist in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The item could not be added to the cart.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Storefront command-line interface
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse the menu, price a cart and place an order", long_about = None)]
pub struct StorefrontArgs {
    /// Store configuration file (YAML). Uses the built-in store when omitted.
    #[arg(short, long, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Storefront commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the menu
    Menu,

    /// Price a cart without ordering
    Quote(CartArgs),

    /// Price a cart and place the order
    Order(OrderArgs),
}

/// Cart contents
#[derive(Debug, Args)]
pub struct CartArgs {
    /// Item to add, as PRODUCT:VARIANT[:QTY] (e.g. `pep:slice:2`). Repeatable.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<ItemArg>,
}

/// Cart contents plus contact and payment details
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Cart contents
    #[command(flatten)]
    pub cart: CartArgs,

    /// Full name
    #[arg(long)]
    pub name: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Delivery address
    #[arg(long)]
    pub address: String,

    /// Notes for the kitchen or driver
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Card number; pays cash on delivery when omitted
    #[arg(long)]
    pub card_number: Option<String>,

    /// Card expiry (MM/YY)
    #[arg(long, requires = "card_number")]
    pub card_expiry: Option<String>,

    /// Card security code
    #[arg(long, requires = "card_number")]
    pub card_cvc: Option<String>,
}

impl OrderArgs {
    /// Contact and payment details from the arguments.
    pub fn order_details(&self) -> OrderDetails {
        let payment = match &self.card_number {
            Some(number) => Payment::Card(CardDetails {
                number: number.clone(),
                expiry: self.card_expiry.clone().unwrap_or_default(),
                cvc: self.card_cvc.clone().unwrap_or_default(),
            }),
            None => Payment::Cash,
        };

        OrderDetails {
            contact: Contact {
                name: self.name.clone(),
                phone: self.phone.clone(),
                address: self.address.clone(),
                notes: self.notes.clone(),
            },
            payment,
        }
    }
}

/// A single `--item` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    /// Catalog id
    pub product_id: String,

    /// Variant to add
    pub variant: Variant,

    /// Units to add
    pub quantity: u32,
}

impl FromStr for ItemArg {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');

        let (Some(product_id), Some(variant)) = (parts.next(), parts.next()) else {
            return Err(CliError::InvalidItem(s.to_string()));
        };

        let quantity = match parts.next() {
            Some(quantity) => quantity
                .parse::<u32>()
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or_else(|| CliError::InvalidItem(s.to_string()))?,
            None => 1,
        };

        if product_id.is_empty() || parts.next().is_some() {
            return Err(CliError::InvalidItem(s.to_string()));
        }

        Ok(ItemArg {
            product_id: product_id.to_string(),
            variant: variant.parse()?,
            quantity,
        })
    }
}

/// Fill a cart from `--item` values, pricing each from the catalog.
///
/// # Errors
///
/// Returns a [`CliError`] if an item is not in the catalog or cannot be added.
pub fn build_cart<'a>(catalog: &Catalog<'a>, items: &[ItemArg]) -> Result<Cart<'a>, CliError> {
    items.iter().try_fold(Cart::new(catalog.currency()), |cart, item| {
        let entry = catalog.entry(&item.product_id, item.variant, item.quantity)?;

        Ok(cart.upsert(entry)?)
    })
}
