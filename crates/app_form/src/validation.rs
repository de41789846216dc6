//! Field validation for the wizard steps
//!
//! Validation is all-at-once per step, not per-field-as-typed: every rule
//! runs and the outcome accumulates field-scoped errors in declared order,
//! so the first entry is the field that receives focus priority.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use domain_pricing::UsageClass;

use crate::session::{FormField, FormFields};

/// Minimum insurable vehicle value in ZMW
pub const MIN_VEHICLE_VALUE: i64 = 1000;

/// Oldest acceptable vehicle age in whole years, mirroring the calculator
const MAX_VEHICLE_AGE_YEARS: i32 = domain_pricing::MAX_VEHICLE_AGE_YEARS;

/// A single field-scoped validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Accumulated result of validating one step
///
/// Errors are field-scoped and non-blocking for the other fields: a step
/// with three bad inputs reports all three.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<FieldError>,
}

impl ValidationOutcome {
    /// True when no rule failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All field errors, in declared field order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The field that should receive focus, if any
    pub fn first_invalid(&self) -> Option<FormField> {
        self.errors.first().map(|e| e.field)
    }

    fn add(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validates Step 1 (personal info): full name, email, phone, NRC
pub fn validate_step1(fields: &FormFields) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if fields.get(FormField::FullName).is_none() {
        outcome.add(FormField::FullName, "Full name is required");
    }

    match fields.get(FormField::Email) {
        None => outcome.add(FormField::Email, "Email address is required"),
        Some(email) if !is_plausible_email(email) => {
            outcome.add(FormField::Email, "Enter a valid email address")
        }
        Some(_) => {}
    }

    match fields.get(FormField::Phone) {
        None => outcome.add(FormField::Phone, "Phone number is required"),
        Some(phone) if !is_zambian_phone(phone) => {
            outcome.add(FormField::Phone, "Enter a valid Zambian phone number")
        }
        Some(_) => {}
    }

    if fields.get(FormField::Nrc).is_none() {
        outcome.add(FormField::Nrc, "NRC number is required");
    }

    outcome
}

/// Validates Step 2 (vehicle info) all at once, in declared field order
pub fn validate_step2(fields: &FormFields, current_year: i32) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if fields.get(FormField::VehicleMake).is_none() {
        outcome.add(FormField::VehicleMake, "Vehicle make is required");
    }
    if fields.get(FormField::VehicleModel).is_none() {
        outcome.add(FormField::VehicleModel, "Vehicle model is required");
    }

    match fields.get(FormField::VehicleYear) {
        None => outcome.add(FormField::VehicleYear, "Vehicle year is required"),
        Some(raw) => match raw.parse::<i32>() {
            Ok(year)
                if (1000..=9999).contains(&year)
                    && (0..=MAX_VEHICLE_AGE_YEARS).contains(&(current_year - year)) => {}
            _ => outcome.add(FormField::VehicleYear, "Enter a plausible vehicle year"),
        },
    }

    match fields.get(FormField::VehicleValue) {
        None => outcome.add(FormField::VehicleValue, "Vehicle value is required"),
        Some(raw) => match Decimal::from_str(raw) {
            Ok(value) if value >= Decimal::new(MIN_VEHICLE_VALUE, 0) => {}
            Ok(_) => outcome.add(
                FormField::VehicleValue,
                format!("Vehicle value must be at least ZMW {MIN_VEHICLE_VALUE}"),
            ),
            Err(_) => outcome.add(FormField::VehicleValue, "Enter a numeric vehicle value"),
        },
    }

    if fields.get(FormField::NumberPlate).is_none() {
        outcome.add(FormField::NumberPlate, "Number plate is required");
    }
    if fields.get(FormField::DocumentRef).is_none() {
        outcome.add(
            FormField::DocumentRef,
            "Vehicle registration document is required",
        );
    }

    match fields.get(FormField::Usage) {
        None => outcome.add(FormField::Usage, "Vehicle usage is required"),
        Some(raw) if UsageClass::from_str(raw).is_err() => {
            outcome.add(FormField::Usage, "Select a valid usage class")
        }
        Some(_) => {}
    }

    outcome
}

/// Minimal email shape check: one '@' with a dotted domain after it
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// Zambian mobile number: optional "+260" or "0" prefix, then nine digits
/// starting with 9 or 7
fn is_zambian_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let rest = compact
        .strip_prefix("+260")
        .or_else(|| compact.strip_prefix('0'))
        .unwrap_or(&compact);

    rest.len() == 9
        && rest.starts_with(['9', '7'])
        && rest.chars().all(|c| c.is_ascii_digit())
}
