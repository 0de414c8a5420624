//! Order summary handed to the notifier

use std::{fmt, io};

use crate::{
    checkout::order::{Contact, OrderDetails},
    receipt::{Receipt, ReceiptError},
};

/// A completed, priced order ready to be dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary<'a> {
    store_name: String,
    receipt: Receipt<'a>,
    contact: Contact,
    payment: &'static str,
}

impl<'a> OrderSummary<'a> {
    /// Assemble a summary from a priced receipt and the order details.
    pub fn new(store_name: impl Into<String>, receipt: Receipt<'a>, order: &OrderDetails) -> Self {
        Self {
            store_name: store_name.into(),
            receipt,
            contact: order.contact.clone(),
            payment: order.payment.label(),
        }
    }

    /// Store the order was placed with
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// Priced lines and totals
    pub fn receipt(&self) -> &Receipt<'a> {
        &self.receipt
    }

    /// Contact and delivery details
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Payment method label
    pub fn payment(&self) -> &'static str {
        self.payment
    }

    /// Plain-text message, one fact per line.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Writes the summary as a receipt table followed by the contact details.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        writeln!(out, "Order {}", self.store_name).map_err(|_err| ReceiptError::IO)?;

        self.receipt.write_to(&mut out)?;

        writeln!(
            out,
            "\n Deliver to {} ({}), {}\n Payment: {}",
            self.contact.name, self.contact.phone, self.contact.address, self.payment
        )
        .map_err(|_err| ReceiptError::IO)
    }
}

impl fmt::Display for OrderSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order {}", self.store_name)?;
        writeln!(f)?;

        for line in self.receipt.lines() {
            writeln!(
                f,
                "{} x {} ({})",
                line.quantity,
                line.name,
                line.variant.label()
            )?;
        }

        let contact = &self.contact;
        let notes = if contact.notes.trim().is_empty() {
            "-"
        } else {
            contact.notes.as_str()
        };

        writeln!(f)?;
        writeln!(f, "Subtotal: {}", self.receipt.subtotal())?;
        writeln!(f, "Delivery: {}", self.receipt.delivery())?;
        writeln!(f, "Total: {}", self.receipt.total())?;
        writeln!(f)?;
        writeln!(f, "Name: {}", contact.name)?;
        writeln!(f, "Phone: {}", contact.phone)?;
        writeln!(f, "Address: {}", contact.address)?;
        writeln!(f, "Notes: {notes}")?;
        write!(f, "Payment: {}", self.payment)
    }
}
