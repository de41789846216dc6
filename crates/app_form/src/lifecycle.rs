//! The two-step wizard state machine
//!
//! ```text
//!            restore (fresh session)
//!                     |
//!                     v
//!   Step1 --advance (valid)--> Step2 --submit (valid)--> Submitted
//!     ^                          |                       (session cleared)
//!     +---------back------------+
//! ```
//!
//! Every field edit persists the full non-empty field map plus the current
//! step, write-through. Failed transitions re-render the current step with
//! field-scoped errors and never persist a step change.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use core_kernel::{Currency, Money, PersistencePort};
use domain_pricing::{CoverageTier, UsageClass};
use domain_quote::{QuoteDraft, QuoteRequest};

use crate::error::FormError;
use crate::session::{FormField, FormFields, FormSession, SessionStore};
use crate::validation::{validate_step1, validate_step2};

/// The wizard's explicit steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    /// Personal info
    Step1,
    /// Vehicle info
    Step2,
}

impl FormStep {
    /// The persisted step index
    pub fn index(&self) -> u8 {
        match self {
            FormStep::Step1 => 1,
            FormStep::Step2 => 2,
        }
    }

    fn from_index(index: u8) -> FormStep {
        match index {
            2 => FormStep::Step2,
            _ => FormStep::Step1,
        }
    }
}

/// Owns the wizard state and its persisted session
///
/// The manager is the only writer of the form session. Submission is
/// terminal: it clears the session and hands a finalized
/// [`QuoteRequest`] to the quote-service boundary.
pub struct FormLifecycleManager {
    sessions: SessionStore,
    fields: FormFields,
    step: FormStep,
    restored: bool,
}

impl FormLifecycleManager {
    /// Enters the wizard, restoring a fresh persisted session if one exists
    ///
    /// A stale, corrupted, or unreadable session silently yields an empty
    /// form at Step 1.
    pub async fn start(store: Arc<dyn PersistencePort>) -> Self {
        let sessions = SessionStore::new(store);
        match sessions.restore().await {
            Some(session) => {
                tracing::info!(step = session.step, "form session restored");
                Self {
                    sessions,
                    fields: session.data,
                    step: FormStep::from_index(session.step),
                    restored: true,
                }
            }
            None => Self {
                sessions,
                fields: FormFields::default(),
                step: FormStep::Step1,
                restored: false,
            },
        }
    }

    /// Current wizard step
    pub fn step(&self) -> FormStep {
        self.step
    }

    /// Current field values
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Whether entry restored a persisted session
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    /// Applies a field edit and persists the session write-through
    pub async fn edit_field(&mut self, field: FormField, value: &str) {
        self.fields.set(field, value);
        self.persist().await;
    }

    /// Step1 -> Step2, gated on Step 1 validation
    ///
    /// # Errors
    ///
    /// [`FormError::Validation`] with field-scoped errors; the step change
    /// is not persisted on failure.
    pub async fn advance(&mut self) -> Result<(), FormError> {
        if self.step != FormStep::Step1 {
            return Err(FormError::WrongStep {
                action: "advance",
                step: self.step.index(),
            });
        }

        let outcome = validate_step1(&self.fields);
        if !outcome.is_valid() {
            return Err(FormError::Validation(outcome));
        }

        self.step = FormStep::Step2;
        self.persist().await;
        Ok(())
    }

    /// Step2 -> Step1, unconditional back navigation
    pub async fn back(&mut self) -> Result<(), FormError> {
        if self.step != FormStep::Step2 {
            return Err(FormError::WrongStep {
                action: "go back",
                step: self.step.index(),
            });
        }
        self.step = FormStep::Step1;
        self.persist().await;
        Ok(())
    }

    /// Step2 -> Submitted: validates everything, clears the session, and
    /// returns the finalized request for the quote-service boundary
    ///
    /// Validation is all-at-once; on failure the first error in declared
    /// field order carries focus priority and nothing is cleared. Step 1
    /// fields are re-checked so a tampered restore cannot smuggle an
    /// incomplete request past the boundary.
    pub async fn submit(&mut self) -> Result<QuoteRequest, FormError> {
        if self.step != FormStep::Step2 {
            return Err(FormError::WrongStep {
                action: "submit",
                step: self.step.index(),
            });
        }

        let current_year = Utc::now().year();
        let outcome = validate_step2(&self.fields, current_year);
        if !outcome.is_valid() {
            return Err(FormError::Validation(outcome));
        }
        let step1 = validate_step1(&self.fields);
        if !step1.is_valid() {
            return Err(FormError::Validation(step1));
        }

        let request = self
            .draft()
            .finalize()
            .expect("validated fields always finalize");

        self.sessions.clear().await;
        self.fields = FormFields::default();
        self.step = FormStep::Step1;
        self.restored = false;

        tracing::info!(tier = %request.coverage_tier, "form submitted, session cleared");
        Ok(request)
    }

    /// Best-effort draft of the current fields, for the live preview path
    ///
    /// Unparseable numeric fields are left absent rather than erroring. The
    /// coverage tier always carries a value: the form pre-selects standard
    /// cover, so an untouched selector still previews at the standard tier.
    pub fn draft(&self) -> QuoteDraft {
        let parse_tier = self
            .fields
            .get(FormField::CoverageTier)
            .and_then(|raw| CoverageTier::from_str(raw).ok())
            .or(Some(CoverageTier::Standard));

        QuoteDraft {
            full_name: self.fields.full_name.clone(),
            email: self.fields.email.clone(),
            phone: self.fields.phone.clone(),
            nrc: self.fields.nrc.clone(),
            vehicle_make: self.fields.vehicle_make.clone(),
            vehicle_model: self.fields.vehicle_model.clone(),
            vehicle_year: self
                .fields
                .get(FormField::VehicleYear)
                .and_then(|raw| raw.parse().ok()),
            vehicle_value: self
                .fields
                .get(FormField::VehicleValue)
                .and_then(|raw| Decimal::from_str(raw).ok())
                .map(|value| Money::new(value, Currency::ZMW)),
            usage: self
                .fields
                .get(FormField::Usage)
                .and_then(|raw| UsageClass::from_str(raw).ok()),
            coverage_tier: parse_tier,
            number_plate: self.fields.number_plate.clone(),
            document_ref: self.fields.document_ref.clone(),
        }
    }

    async fn persist(&self) {
        let session = FormSession {
            data: self.fields.clone(),
            step: self.step.index(),
            saved_at: Utc::now(),
        };
        self.sessions.persist(&session).await;
    }
}
