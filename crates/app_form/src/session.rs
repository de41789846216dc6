//! Persisted form sessions
//!
//! The wizard's partial state lives in device storage as a single JSON
//! document: the non-empty field map, the step index, and the save
//! timestamp. A session older than 24 hours is stale and ignored on
//! restore. Writes are write-through and last-write-wins; there is no merge
//! logic beyond skipping empty values.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PersistencePort;

/// Storage key for the persisted form session
pub const FORM_DATA_KEY: &str = "motor_insurance_form_data";

/// Hours after which a persisted session is stale
pub const SESSION_FRESHNESS_HOURS: i64 = 24;

/// The wizard's input fields, addressable by name
///
/// Step 2's declared order doubles as the focus priority when an
/// all-at-once validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    Phone,
    Nrc,
    VehicleMake,
    VehicleModel,
    VehicleYear,
    VehicleValue,
    NumberPlate,
    DocumentRef,
    Usage,
    CoverageTier,
}

impl FormField {
    /// Step 1 required fields, in declared order
    pub const STEP1_ORDER: [FormField; 4] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::Nrc,
    ];

    /// Step 2 required fields, in declared (focus-priority) order
    pub const STEP2_ORDER: [FormField; 7] = [
        FormField::VehicleMake,
        FormField::VehicleModel,
        FormField::VehicleYear,
        FormField::VehicleValue,
        FormField::NumberPlate,
        FormField::DocumentRef,
        FormField::Usage,
    ];

    /// Stable name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            FormField::FullName => "full_name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Nrc => "nrc",
            FormField::VehicleMake => "vehicle_make",
            FormField::VehicleModel => "vehicle_model",
            FormField::VehicleYear => "vehicle_year",
            FormField::VehicleValue => "vehicle_value",
            FormField::NumberPlate => "number_plate",
            FormField::DocumentRef => "document_ref",
            FormField::Usage => "usage",
            FormField::CoverageTier => "coverage_tier",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Partial field map as captured from the form inputs
///
/// Values are kept as entered (raw strings); parsing happens during
/// validation. Empty entries are skipped both in memory and on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nrc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_tier: Option<String>,
}

impl FormFields {
    /// Returns the stored value for a field
    pub fn get(&self, field: FormField) -> Option<&str> {
        let slot = match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Nrc => &self.nrc,
            FormField::VehicleMake => &self.vehicle_make,
            FormField::VehicleModel => &self.vehicle_model,
            FormField::VehicleYear => &self.vehicle_year,
            FormField::VehicleValue => &self.vehicle_value,
            FormField::NumberPlate => &self.number_plate,
            FormField::DocumentRef => &self.document_ref,
            FormField::Usage => &self.usage,
            FormField::CoverageTier => &self.coverage_tier,
        };
        slot.as_deref()
    }

    /// Sets a field from raw input; a blank value clears the field
    pub fn set(&mut self, field: FormField, value: &str) {
        let trimmed = value.trim();
        let stored = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Nrc => &mut self.nrc,
            FormField::VehicleMake => &mut self.vehicle_make,
            FormField::VehicleModel => &mut self.vehicle_model,
            FormField::VehicleYear => &mut self.vehicle_year,
            FormField::VehicleValue => &mut self.vehicle_value,
            FormField::NumberPlate => &mut self.number_plate,
            FormField::DocumentRef => &mut self.document_ref,
            FormField::Usage => &mut self.usage,
            FormField::CoverageTier => &mut self.coverage_tier,
        };
        *slot = stored;
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        FormField::STEP1_ORDER
            .iter()
            .chain(FormField::STEP2_ORDER.iter())
            .chain([FormField::CoverageTier].iter())
            .all(|f| self.get(*f).is_none())
    }
}

/// The persisted session snapshot
///
/// The JSON layout keeps the three fields any implementation must retain:
/// the field map (`data`), the step index (`step`), and the save timestamp
/// (`timestamp`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSession {
    /// Non-empty field map
    pub data: FormFields,
    /// Wizard step index (1 or 2)
    pub step: u8,
    /// When the snapshot was saved
    #[serde(rename = "timestamp")]
    pub saved_at: DateTime<Utc>,
}

impl FormSession {
    /// Whether the snapshot is still within the freshness window
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at < Duration::hours(SESSION_FRESHNESS_HOURS)
    }
}

/// Session persistence over the keyed storage port
///
/// Read and parse failures are recovered locally by treating the session as
/// absent; they are never surfaced to the user.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn PersistencePort>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn PersistencePort>) -> Self {
        Self { store }
    }

    /// Loads the persisted session if present and fresh
    pub async fn restore(&self) -> Option<FormSession> {
        let raw = match self.store.get(FORM_DATA_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(%err, "session read failed, starting fresh");
                return None;
            }
        };

        let session: FormSession = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(%err, "session corrupted, starting fresh");
                return None;
            }
        };

        if !session.is_fresh(Utc::now()) {
            tracing::debug!(saved_at = %session.saved_at, "session stale, starting fresh");
            return None;
        }

        Some(session)
    }

    /// Persists the session, overwriting any previous snapshot
    pub async fn persist(&self, session: &FormSession) {
        let serialized = match serde_json::to_string(session) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(%err, "session serialization failed, write skipped");
                return;
            }
        };
        if let Err(err) = self.store.set(FORM_DATA_KEY, &serialized).await {
            tracing::warn!(%err, "session write failed");
        }
    }

    /// Removes the persisted session
    pub async fn clear(&self) {
        if let Err(err) = self.store.remove(FORM_DATA_KEY).await {
            tracing::warn!(%err, "session clear failed");
        }
    }
}
