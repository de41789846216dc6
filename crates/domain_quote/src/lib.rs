//! Quote Domain
//!
//! This crate orchestrates the premium calculator for the two quoting modes
//! and owns the simulated checkout:
//!
//! - **Full quote**: a validated, complete request becomes an immutable
//!   [`Quote`] with a fresh identifier, a tier-specific coverage narrative,
//!   and a 30-day validity window.
//! - **Quick preview**: a partial draft yields a bare premium breakdown for
//!   live feedback, or `None` while the form lacks the minimum inputs.
//! - **Checkout**: a simulated payment charges the quote's annual or
//!   quarterly total and produces a receipt.
//!
//! Quote expiry is advisory: the service stamps `valid_until` but never
//! refuses a calculation, leaving enforcement to whoever presents the quote.

pub mod checkout;
pub mod error;
pub mod history;
pub mod quote;
pub mod request;
pub mod service;

pub use checkout::{
    CheckoutService, PaymentFrequency, PaymentReceipt, PaymentStatus,
};
pub use error::{CheckoutError, QuoteError};
pub use history::{PaymentHistoryEntry, QuoteHistoryEntry};
pub use quote::{Quote, QUOTE_VALIDITY_DAYS};
pub use request::{QuoteDraft, QuoteRequest};
pub use service::QuoteService;
