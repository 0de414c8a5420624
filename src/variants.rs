//! Variants

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown variant: {0}")]
pub struct UnknownVariant(pub String);

/// A priced product option, chosen when the product is added to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// A single slice
    Slice,

    /// The whole pizza
    Full,
}

impl Variant {
    /// Identifier used in line keys and configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Slice => "slice",
            Variant::Full => "full",
        }
    }

    /// Human-readable label used on receipts and order summaries.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Slice => "Slice",
            Variant::Full => "Whole pizza",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slice" => Ok(Variant::Slice),
            "full" => Ok(Variant::Full),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
