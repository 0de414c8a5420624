//! Pricing
//!
//! Subtotal, delivery fee and total for a cart under a [`DeliveryPolicy`].

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::Cart;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The policy and the amount being priced use different currencies.
    #[error("Currency mismatch: expected {expected}, found {actual}")]
    CurrencyMismatch {
        /// Currency of the delivery policy
        expected: &'static str,
        /// Currency of the amount
        actual: &'static str,
    },

    /// A delivery policy amount was negative.
    #[error("Delivery policy amounts must not be negative")]
    NegativeAmount,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Delivery fee rule: a flat fee, waived for an empty order or once the
/// subtotal reaches the free-delivery threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryPolicy<'a> {
    free_threshold: Money<'a, Currency>,
    flat_fee: Money<'a, Currency>,
}

impl<'a> DeliveryPolicy<'a> {
    /// Create a policy from a free-delivery threshold and a flat fee.
    ///
    /// # Errors
    ///
    /// - [`PricingError::CurrencyMismatch`]: the two amounts use different currencies.
    /// - [`PricingError::NegativeAmount`]: either amount is negative.
    pub fn new(
        free_threshold: Money<'a, Currency>,
        flat_fee: Money<'a, Currency>,
    ) -> Result<Self, PricingError> {
        ensure_same_currency(free_threshold.currency(), flat_fee.currency())?;

        if free_threshold.to_minor_units() < 0 || flat_fee.to_minor_units() < 0 {
            return Err(PricingError::NegativeAmount);
        }

        Ok(Self {
            free_threshold,
            flat_fee,
        })
    }

    /// Reference policy: free delivery from 400.00, otherwise 30.00.
    pub fn reference(currency: &'a Currency) -> Self {
        Self {
            free_threshold: Money::from_minor(40_000, currency),
            flat_fee: Money::from_minor(3_000, currency),
        }
    }

    /// Subtotal at which delivery becomes free
    pub fn free_threshold(&self) -> Money<'a, Currency> {
        self.free_threshold
    }

    /// Fee charged below the threshold
    pub fn flat_fee(&self) -> Money<'a, Currency> {
        self.flat_fee
    }

    /// Currency of the policy
    pub fn currency(&self) -> &'a Currency {
        self.flat_fee.currency()
    }

    /// Delivery fee for the given subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::CurrencyMismatch`] if `subtotal` is not in the
    /// policy currency.
    pub fn fee_for(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PricingError> {
        ensure_same_currency(self.currency(), subtotal.currency())?;

        let minor = subtotal.to_minor_units();

        if minor == 0 || minor >= self.free_threshold.to_minor_units() {
            Ok(Money::from_minor(0, subtotal.currency()))
        } else {
            Ok(self.flat_fee)
        }
    }
}

/// Computed amounts for a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals<'a> {
    /// Sum of all line totals
    pub subtotal: Money<'a, Currency>,

    /// Delivery fee for the subtotal
    pub delivery: Money<'a, Currency>,

    /// Subtotal plus delivery
    pub total: Money<'a, Currency>,
}

impl Totals<'_> {
    /// Whether the delivery fee was waived.
    pub fn free_delivery(&self) -> bool {
        self.delivery.to_minor_units() == 0
    }
}

/// Calculates the subtotal of a cart.
pub fn subtotal<'a>(cart: &Cart<'a>) -> Money<'a, Currency> {
    cart.subtotal()
}

/// Calculates the delivery fee for a subtotal.
///
/// # Errors
///
/// Returns [`PricingError::CurrencyMismatch`] if the subtotal and policy currencies differ.
pub fn delivery_fee<'a>(
    subtotal: &Money<'a, Currency>,
    policy: &DeliveryPolicy<'a>,
) -> Result<Money<'a, Currency>, PricingError> {
    policy.fee_for(subtotal)
}

/// Calculates the total of a cart: subtotal plus delivery fee.
///
/// # Errors
///
/// Returns a [`PricingError`] if the cart and policy currencies differ.
pub fn total<'a>(
    cart: &Cart<'a>,
    policy: &DeliveryPolicy<'a>,
) -> Result<Money<'a, Currency>, PricingError> {
    Ok(price(cart, policy)?.total)
}

/// Calculates subtotal, delivery fee and total for a cart in one pass.
///
/// # Errors
///
/// Returns a [`PricingError`] if the cart and policy currencies differ.
pub fn price<'a>(
    cart: &Cart<'a>,
    policy: &DeliveryPolicy<'a>,
) -> Result<Totals<'a>, PricingError> {
    let subtotal = cart.subtotal();
    let delivery = policy.fee_for(&subtotal)?;
    let total = subtotal.add(delivery)?;

    Ok(Totals {
        subtotal,
        delivery,
        total,
    })
}

fn ensure_same_currency(expected: &Currency, actual: &Currency) -> Result<(), PricingError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PricingError::CurrencyMismatch {
            expected: expected.iso_alpha_code,
            actual: actual.iso_alpha_code,
        })
    }
}
