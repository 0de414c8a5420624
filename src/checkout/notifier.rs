//! Checkout notifiers
//!
//! A notifier is the outbound channel a completed order is handed to.

use std::io;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::checkout::summary::OrderSummary;

/// Default chat deep-link endpoint.
pub const DEFAULT_MESSAGE_ENDPOINT: &str = "https://wa.me/";

/// Errors raised while dispatching an order.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// The message link could not be built.
    #[error("Invalid message link: {0}")]
    Url(#[from] url::ParseError),

    /// The destination is not a plain phone number.
    #[error("Invalid destination phone number: {0}")]
    InvalidPhone(String),

    /// Writing to the output sink failed.
    #[error("Failed to write order: {0}")]
    Io(#[from] io::Error),
}

/// Receives completed orders.
pub trait CheckoutNotifier {
    /// Dispatch an order summary.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifierError`] if the order could not be dispatched.
    fn submit_order(&mut self, summary: &OrderSummary<'_>) -> Result<(), NotifierError>;
}

/// Writes the plain-text order summary to a sink.
#[derive(Debug)]
pub struct WriterNotifier<W> {
    out: W,
}

impl<W: io::Write> WriterNotifier<W> {
    /// Create a notifier writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> CheckoutNotifier for WriterNotifier<W> {
    fn submit_order(&mut self, summary: &OrderSummary<'_>) -> Result<(), NotifierError> {
        writeln!(self.out, "{summary}")?;
        self.out.flush()?;

        Ok(())
    }
}

/// Builds a chat deep link carrying the order summary and writes it to a sink.
#[derive(Debug)]
pub struct MessageLinkNotifier<W> {
    endpoint: Url,
    phone: String,
    out: W,
}

impl<W: io::Write> MessageLinkNotifier<W> {
    /// Create a notifier for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::InvalidPhone`] if `phone` is not all digits.
    pub fn new(phone: impl Into<String>, out: W) -> Result<Self, NotifierError> {
        Self::with_endpoint(DEFAULT_MESSAGE_ENDPOINT, phone, out)
    }

    /// Create a notifier for a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifierError`] if the endpoint is not a valid URL or
    /// `phone` is not all digits.
    pub fn with_endpoint(
        endpoint: &str,
        phone: impl Into<String>,
        out: W,
    ) -> Result<Self, NotifierError> {
        let phone = phone.into();

        if phone.is_empty() || !phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NotifierError::InvalidPhone(phone));
        }

        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            phone,
            out,
        })
    }

    /// Deep link for a summary.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Url`] if the phone number cannot be joined onto the endpoint.
    pub fn link(&self, summary: &OrderSummary<'_>) -> Result<Url, NotifierError> {
        let mut url = self.endpoint.join(&self.phone)?;

        url.query_pairs_mut()
            .append_pair("text", &summary.to_text());

        Ok(url)
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> CheckoutNotifier for MessageLinkNotifier<W> {
    fn submit_order(&mut self, summary: &OrderSummary<'_>) -> Result<(), NotifierError> {
        let link = self.link(summary)?;

        debug!(host = link.host_str().unwrap_or_default(), "dispatching order link");

        writeln!(self.out, "{link}")?;
        self.out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::MXN};
    use testresult::TestResult;

    use crate::{
        cart::Cart,
        checkout::order::{Contact, OrderDetails, Payment},
        items::CartEntry,
        pricing::DeliveryPolicy,
        receipt::Receipt,
        variants::Variant,
    };

    use super::*;

    fn summary<'a>() -> TestResult<OrderSummary<'a>> {
        let cart = Cart::new(MXN).upsert(CartEntry {
            product_id: "pep".to_string(),
            display_name: "Peperoni".to_string(),
            variant: Variant::Full,
            unit_price: Money::from_minor(30_000, MXN),
            quantity: 1,
        })?;

        let order = OrderDetails {
            contact: Contact {
                name: "Ana López".to_string(),
                phone: "6311234567".to_string(),
                address: "Calle 1 & 2".to_string(),
                notes: String::new(),
            },
            payment: Payment::Cash,
        };

        Ok(OrderSummary::new(
            "NILU",
            Receipt::from_cart(&cart, &DeliveryPolicy::reference(MXN))?,
            &order,
        ))
    }

    #[test]
    fn link_targets_phone_and_encodes_text() -> TestResult {
        let notifier = MessageLinkNotifier::new("526311234567", Vec::new())?;
        let summary = summary()?;

        let link = notifier.link(&summary)?;

        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/526311234567");

        let text = link
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned());

        assert_eq!(text, Some(summary.to_text()));
        assert!(!link.as_str().contains(' '));
        assert!(!link.as_str().contains('\n'));

        Ok(())
    }

    #[test]
    fn submit_writes_link_to_sink() -> TestResult {
        let mut notifier = MessageLinkNotifier::new("526311234567", Vec::new())?;

        notifier.submit_order(&summary()?)?;

        let written = String::from_utf8(notifier.into_inner())?;

        assert!(written.starts_with("https://wa.me/526311234567?text="));
        assert!(written.ends_with('\n'));

        Ok(())
    }

    #[test]
    fn rejects_non_numeric_phone() {
        assert!(matches!(
            MessageLinkNotifier::new("+52 631", Vec::new()),
            Err(NotifierError::InvalidPhone(_))
        ));
    }

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(matches!(
            MessageLinkNotifier::with_endpoint("not a url", "5263", Vec::new()),
            Err(NotifierError::Url(_))
        ));
    }

    #[test]
    fn writer_notifier_writes_plain_text() -> TestResult {
        let mut notifier = WriterNotifier::new(Vec::new());
        let summary = summary()?;

        notifier.submit_order(&summary)?;

        let written = String::from_utf8(notifier.into_inner())?;

        assert_eq!(written, format!("{}\n", summary.to_text()));

        Ok(())
    }
}
