//! Order details collected at checkout

/// Who the order is for and where it goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    /// Full name
    pub name: String,

    /// Phone number
    pub phone: String,

    /// Delivery address
    pub address: String,

    /// Free-form notes, may be empty
    pub notes: String,
}

/// Card fields as typed by the customer, unvalidated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    /// Card number, whitespace allowed
    pub number: String,

    /// Expiry as `MM/YY`
    pub expiry: String,

    /// Security code
    pub cvc: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("cvc", &"<redacted>")
            .finish()
    }
}

/// How the customer pays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payment {
    /// Pay on delivery
    Cash,

    /// Simulated card payment
    Card(CardDetails),
}

impl Payment {
    /// Label used in order summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Payment::Cash => "Cash on delivery",
            Payment::Card(_) => "Card",
        }
    }
}

/// Everything submitted with an order besides the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    /// Contact and delivery details
    pub contact: Contact,

    /// Payment method
    pub payment: Payment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_debug_hides_number_and_cvc() {
        let card = CardDetails {
            number: "4242 4242 4242 4242".to_string(),
            expiry: "12/30".to_string(),
            cvc: "123".to_string(),
        };

        let rendered = format!("{card:?}");

        assert!(!rendered.contains("4242"));
        assert!(!rendered.contains("123"));
        assert!(rendered.contains("12/30"));
    }
}
