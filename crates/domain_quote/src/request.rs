//! Quote request snapshots
//!
//! [`QuoteDraft`] mirrors the wizard's partial state; [`QuoteRequest`] is the
//! immutable, fully-populated snapshot the calculator is allowed to see.
//! Completeness is checked in one place so an incomplete request can never
//! reach the pricing engine.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_pricing::{CoverageTier, UsageClass};

use crate::error::QuoteError;

/// A complete, validated quote request
///
/// Immutable input snapshot; constructed only through
/// [`QuoteDraft::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Applicant's full name
    pub full_name: String,
    /// Applicant's email address
    pub email: String,
    /// Applicant's phone number
    pub phone: String,
    /// National Registration Card number
    pub nrc: String,
    /// Vehicle manufacturer
    pub vehicle_make: String,
    /// Vehicle model
    pub vehicle_model: String,
    /// Manufacture year (4-digit)
    pub vehicle_year: i32,
    /// Declared vehicle value
    pub vehicle_value: Money,
    /// How the vehicle is used
    pub usage: UsageClass,
    /// Requested coverage tier
    pub coverage_tier: CoverageTier,
    /// Registration number plate
    pub number_plate: String,
    /// Reference to the uploaded registration document (white book)
    pub document_ref: String,
}

/// A partially-filled quote request
///
/// Every field is optional; the quick-preview path needs only
/// `vehicle_value` and `coverage_tier`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nrc: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<i32>,
    pub vehicle_value: Option<Money>,
    pub usage: Option<UsageClass>,
    pub coverage_tier: Option<CoverageTier>,
    pub number_plate: Option<String>,
    pub document_ref: Option<String>,
}

impl QuoteDraft {
    /// Returns true when the draft carries the minimum inputs for a live
    /// preview: vehicle value and coverage tier
    pub fn has_preview_inputs(&self) -> bool {
        self.vehicle_value.is_some() && self.coverage_tier.is_some()
    }

    /// Converts the draft into a complete [`QuoteRequest`]
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::IncompleteRequest`] naming the first missing
    /// field in declared order.
    pub fn finalize(self) -> Result<QuoteRequest, QuoteError> {
        fn required<T>(value: Option<T>, field: &'static str) -> Result<T, QuoteError> {
            value.ok_or(QuoteError::IncompleteRequest { field })
        }

        Ok(QuoteRequest {
            full_name: required(self.full_name, "full_name")?,
            email: required(self.email, "email")?,
            phone: required(self.phone, "phone")?,
            nrc: required(self.nrc, "nrc")?,
            vehicle_make: required(self.vehicle_make, "vehicle_make")?,
            vehicle_model: required(self.vehicle_model, "vehicle_model")?,
            vehicle_year: required(self.vehicle_year, "vehicle_year")?,
            vehicle_value: required(self.vehicle_value, "vehicle_value")?,
            usage: required(self.usage, "usage")?,
            coverage_tier: required(self.coverage_tier, "coverage_tier")?,
            number_plate: required(self.number_plate, "number_plate")?,
            document_ref: required(self.document_ref, "document_ref")?,
        })
    }
}

impl From<QuoteRequest> for QuoteDraft {
    fn from(request: QuoteRequest) -> Self {
        Self {
            full_name: Some(request.full_name),
            email: Some(request.email),
            phone: Some(request.phone),
            nrc: Some(request.nrc),
            vehicle_make: Some(request.vehicle_make),
            vehicle_model: Some(request.vehicle_model),
            vehicle_year: Some(request.vehicle_year),
            vehicle_value: Some(request.vehicle_value),
            usage: Some(request.usage),
            coverage_tier: Some(request.coverage_tier),
            number_plate: Some(request.number_plate),
            document_ref: Some(request.document_ref),
        }
    }
}
