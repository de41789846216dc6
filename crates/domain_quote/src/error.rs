//! Quote domain errors

use thiserror::Error;

use core_kernel::MoneyError;
use domain_pricing::PricingError;

/// Errors from the quote service
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A required field was absent on the full-quote path
    ///
    /// Surfaced as a validation failure, never retried. The quick-preview
    /// path never raises this: missing inputs there are a valid "not enough
    /// data yet" state, reported as `Ok(None)`.
    #[error("Missing required field: {field}")]
    IncompleteRequest { field: &'static str },

    /// The calculator rejected the inputs
    #[error("Premium calculation failed: {0}")]
    Pricing(#[from] PricingError),
}

/// Errors from the simulated checkout
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Only annual and quarterly charges are valid; anything else is a
    /// caller error
    #[error("Unsupported payment frequency: {frequency}. Only quarterly and annual payments are allowed")]
    UnsupportedFrequency { frequency: String },

    /// Monetary arithmetic error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
