//! Store configuration
//!
//! Loads the menu, delivery policy and notification settings from YAML.
//! Prices are written as `"AMOUNT CURRENCY"` strings, e.g. `"2.99 GBP"`.

use std::{collections::BTreeMap, fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, MXN, USD},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    catalog::{Catalog, CatalogError},
    pricing::{DeliveryPolicy, PricingError},
    products::Product,
    variants::Variant,
};

/// Built-in reference store.
const REFERENCE_STORE: &str = include_str!("../fixtures/store.yml");

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
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

    /// A delivery amount is in a different currency than the store
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Invalid catalog contents
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid delivery policy
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Store file layout
#[derive(Debug, Deserialize)]
struct StoreFile {
    name: String,
    currency: String,
    delivery: DeliveryFile,
    #[serde(default)]
    notify: Option<NotifyFile>,
    #[serde(default)]
    menu: Vec<ProductFile>,
}

#[derive(Debug, Deserialize)]
struct DeliveryFile {
    free_threshold: String,
    flat_fee: String,
}

#[derive(Debug, Deserialize)]
struct NotifyFile {
    phone: String,
}

#[derive(Debug, Deserialize)]
struct ProductFile {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    prices: BTreeMap<Variant, String>,
}

/// A configured store: catalog, delivery policy and where orders go.
#[derive(Debug, Clone)]
pub struct Store<'a> {
    /// Store name, used as the order summary heading
    pub name: String,

    /// Menu
    pub catalog: Catalog<'a>,

    /// Delivery fee rule
    pub delivery: DeliveryPolicy<'a>,

    /// Phone number that receives order messages
    pub notify_phone: Option<String>,
}

impl Store<'static> {
    /// The built-in reference store.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded configuration is invalid.
    pub fn reference() -> Result<Self, ConfigError> {
        Self::from_yaml(REFERENCE_STORE)
    }

    /// Load a store from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if prices are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let store = Self::from_yaml(&contents)?;

        info!(
            path = %path.display(),
            products = store.catalog.len(),
            "loaded store configuration"
        );

        Ok(store)
    }

    /// Parse a store from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price cannot be parsed, or
    /// currencies do not match the store currency.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let file: StoreFile = serde_norway::from_str(contents)?;
        let currency = parse_currency(&file.currency)?;

        let free_threshold = parse_money_in(&file.delivery.free_threshold, currency)?;
        let flat_fee = parse_money_in(&file.delivery.flat_fee, currency)?;
        let delivery = DeliveryPolicy::new(free_threshold, flat_fee)?;

        let mut catalog = Catalog::new(currency);

        for product in file.menu {
            let prices = product
                .prices
                .iter()
                .map(|(variant, price)| {
                    let (minor_units, currency) = parse_price(price)?;
                    Ok((*variant, Money::from_minor(minor_units, currency)))
                })
                .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;

            catalog.insert(Product {
                id: product.id,
                name: product.name,
                description: product.description,
                prices,
            })?;
        }

        Ok(Store {
            name: file.name,
            catalog,
            delivery,
            notify_phone: file.notify.map(|notify| notify.phone),
        })
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), ConfigError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(ConfigError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| ConfigError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| ConfigError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for codes the store does not trade in.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim() {
        "MXN" => Ok(MXN),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}

fn parse_money_in(
    s: &str,
    expected: &'static Currency,
) -> Result<Money<'static, Currency>, ConfigError> {
    let (minor_units, currency) = parse_price(s)?;

    if currency != expected {
        return Err(ConfigError::CurrencyMismatch(
            expected.iso_alpha_code.to_string(),
            currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(Money::from_minor(minor_units, currency))
}
