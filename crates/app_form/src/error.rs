//! Form application errors

use thiserror::Error;

use crate::validation::ValidationOutcome;

/// Errors from the form lifecycle
#[derive(Debug, Error)]
pub enum FormError {
    /// A step transition was attempted with invalid fields
    ///
    /// Carries the full field-scoped outcome; the first entry is the field
    /// that receives focus priority.
    #[error("Validation failed: {0}")]
    Validation(ValidationOutcome),

    /// The requested transition does not exist from the current step
    #[error("Cannot {action} from step {step}")]
    WrongStep { action: &'static str, step: u8 },
}
