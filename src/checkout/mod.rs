//! Checkout
//!
//! Validates an order, prices the cart, builds the summary and hands it to a
//! [`CheckoutNotifier`]. Payment is simulated: card fields are checked for
//! shape only and nothing is charged.

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::Cart,
    pricing::DeliveryPolicy,
    receipt::{Receipt, ReceiptError},
};

pub mod notifier;
pub mod order;
pub mod summary;
pub mod validation;

pub use notifier::{CheckoutNotifier, MessageLinkNotifier, NotifierError, WriterNotifier};
pub use order::{CardDetails, Contact, OrderDetails, Payment};
pub use summary::OrderSummary;
pub use validation::{Field, FieldError, Reason, ValidationErrors, validate};

/// Errors that can occur while checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more fields failed validation.
    #[error("Order is invalid: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The cart could not be priced.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// The notifier rejected the order.
    #[error(transparent)]
    Notifier(#[from] NotifierError),
}

/// Check out a cart.
///
/// Nothing is dispatched unless every validation check passes.
///
/// # Errors
///
/// - [`CheckoutError::Invalid`]: contact, cart or card fields failed validation.
/// - [`CheckoutError::Receipt`]: the cart could not be priced under `policy`.
/// - [`CheckoutError::Notifier`]: the notifier failed to dispatch the order.
pub fn submit<'a, N>(
    store_name: &str,
    cart: &Cart<'a>,
    policy: &DeliveryPolicy<'a>,
    order: &OrderDetails,
    notifier: &mut N,
) -> Result<OrderSummary<'a>, CheckoutError>
where
    N: CheckoutNotifier + ?Sized,
{
    if let Err(errors) = validate(order, cart) {
        warn!(failures = errors.len(), %errors, "checkout rejected");

        return Err(errors.into());
    }

    let receipt = Receipt::from_cart(cart, policy)?;
    let summary = OrderSummary::new(store_name, receipt, order);

    notifier.submit_order(&summary)?;

    info!(
        lines = cart.len(),
        units = cart.unit_count(),
        total = %summary.receipt().total(),
        payment = summary.payment(),
        "order submitted"
    );

    Ok(summary)
}
