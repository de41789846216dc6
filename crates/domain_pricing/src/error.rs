//! Pricing domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the pricing domain
#[derive(Debug, Error)]
pub enum PricingError {
    /// Input failed the calculator's guard: non-positive vehicle value or
    /// implausible manufacture year. Fail fast, no retry.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Monetary arithmetic error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl PricingError {
    /// Creates an invalid-input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            reason: reason.into(),
        }
    }
}
