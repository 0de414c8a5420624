//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError},
    checkout::{
        CardDetails, CheckoutError, CheckoutNotifier, Contact, MessageLinkNotifier,
        NotifierError, OrderDetails, OrderSummary, Payment, ValidationErrors, WriterNotifier,
        submit,
    },
    config::{ConfigError, Store},
    items::{CartEntry, LineItem, LineKey},
    pricing::{DeliveryPolicy, PricingError, Totals, delivery_fee, price, subtotal, total},
    products::{Product, ProductKey},
    receipt::{Receipt, ReceiptError},
    variants::Variant,
};
