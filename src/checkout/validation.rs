//! Checkout validation
//!
//! Every check runs; failures are collected as `(field, reason)` pairs so a
//! form can flag all of them at once.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::Cart,
    checkout::order::{CardDetails, OrderDetails, Payment},
};

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Contact name
    Name,
    /// Contact phone
    Phone,
    /// Delivery address
    Address,
    /// The cart itself
    Cart,
    /// Card number
    CardNumber,
    /// Card expiry
    CardExpiry,
    /// Card security code
    CardCvc,
}

impl Field {
    /// Field name as used in forms.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Cart => "cart",
            Field::CardNumber => "card_number",
            Field::CardExpiry => "card_expiry",
            Field::CardCvc => "card_cvc",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Reason {
    /// Required value is blank
    #[error("is required")]
    Required,

    /// Cart has no lines
    #[error("must contain at least one item")]
    EmptyCart,

    /// Card number is not 16 digits
    #[error("must be 16 digits")]
    CardNumberFormat,

    /// Expiry is not a valid `MM/YY`
    #[error("must be a valid MM/YY date")]
    ExpiryFormat,

    /// CVC is not 3 or 4 digits
    #[error("must be 3 or 4 digits")]
    CvcFormat,
}

/// A single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field
    pub field: Field,

    /// What is wrong with it
    pub reason: Reason,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// All validation failures for a checkout attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(SmallVec<[FieldError; 4]>);

impl ValidationErrors {
    /// Failures in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether `field` failed.
    pub fn contains(&self, field: Field) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Reason `field` failed, if it did.
    pub fn reason(&self, field: Field) -> Option<Reason> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.reason)
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no failures.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: Field, reason: Reason) {
        self.0.push(FieldError { field, reason });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }

            write!(f, "{error}")?;
            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate an order against the cart it is for.
///
/// # Errors
///
/// Returns every failed check as [`ValidationErrors`].
pub fn validate(order: &OrderDetails, cart: &Cart<'_>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let contact = &order.contact;

    for (field, value) in [
        (Field::Name, &contact.name),
        (Field::Phone, &contact.phone),
        (Field::Address, &contact.address),
    ] {
        if value.trim().is_empty() {
            errors.push(field, Reason::Required);
        }
    }

    if cart.is_empty() {
        errors.push(Field::Cart, Reason::EmptyCart);
    }

    if let Payment::Card(card) = &order.payment {
        validate_card(card, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_card(card: &CardDetails, errors: &mut ValidationErrors) {
    let digits: String = card.number.chars().filter(|c| !c.is_whitespace()).collect();

    if !(digits.len() == 16 && all_digits(&digits)) {
        errors.push(Field::CardNumber, Reason::CardNumberFormat);
    }

    if !valid_expiry(&card.expiry) {
        errors.push(Field::CardExpiry, Reason::ExpiryFormat);
    }

    if !(matches!(card.cvc.len(), 3 | 4) && all_digits(&card.cvc)) {
        errors.push(Field::CardCvc, Reason::CvcFormat);
    }
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };

    if month.len() != 2 || year.len() != 2 || !all_digits(month) || !all_digits(year) {
        return false;
    }

    month
        .parse::<u8>()
        .is_ok_and(|month| (1..=12).contains(&month))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
