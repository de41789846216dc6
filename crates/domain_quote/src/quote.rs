//! The quote value object and its coverage narrative

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::QuoteId;
use domain_pricing::{CoverageTier, PremiumBreakdown};

use crate::request::QuoteRequest;

/// Number of days a quote stays valid after creation
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// An issued quote
///
/// Created once per full-quote request and immutable thereafter. Expiry is
/// advisory: `valid_until` is stamped here but enforced by the presentation
/// and checkout layers, never by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Collision-resistant quote identifier
    pub quote_id: QuoteId,
    /// Full premium breakdown
    pub breakdown: PremiumBreakdown,
    /// Tier the quote was priced for
    pub coverage_tier: CoverageTier,
    /// Ordered, human-readable coverage bullets for this tier
    pub coverage_details: Vec<String>,
    /// Last day the quote may be accepted
    pub valid_until: NaiveDate,
    /// When the quote was created
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Builds a quote from a priced request
    pub fn issue(
        quote_id: QuoteId,
        request: &QuoteRequest,
        breakdown: PremiumBreakdown,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            quote_id,
            breakdown,
            coverage_tier: request.coverage_tier,
            coverage_details: coverage_narrative(
                request.coverage_tier,
                &request.vehicle_make,
                &request.vehicle_model,
                request.vehicle_year,
            ),
            valid_until: (now + Duration::days(QUOTE_VALIDITY_DAYS)).date_naive(),
            created_at: now,
        }
    }

    /// Whether the validity window has passed (advisory only)
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today > self.valid_until
    }
}

/// Ordered coverage bullets for a tier, personalised with the vehicle
///
/// Each tier has its own fixed benefit list; the first bullet names the
/// insured vehicle.
pub fn coverage_narrative(
    tier: CoverageTier,
    make: &str,
    model: &str,
    year: i32,
) -> Vec<String> {
    let vehicle = format!("{make} {model} ({year})");
    match tier {
        CoverageTier::Basic => vec![
            format!("Third Party liability coverage for your {vehicle}"),
            "Legal minimum requirements as per Zambian Motor Vehicle Insurance Act".to_string(),
            "Third-party bodily injury and property damage coverage up to ZMW 50,000".to_string(),
            "24/7 emergency roadside assistance".to_string(),
        ],
        CoverageTier::Standard => vec![
            format!("Comprehensive coverage for your {vehicle}"),
            "All third-party benefits included".to_string(),
            "Theft and hijacking protection".to_string(),
            "Fire and natural disaster coverage".to_string(),
            "Windscreen replacement".to_string(),
            "Towing services".to_string(),
            "Courtesy car for 3 days".to_string(),
            "Hospital cash benefit".to_string(),
        ],
        CoverageTier::Premium => vec![
            format!("Premium Plus coverage for your {vehicle}"),
            "All comprehensive benefits included".to_string(),
            "Extended courtesy car (7 days)".to_string(),
            "Personal accident cover up to ZMW 100,000".to_string(),
            "Personal belongings coverage".to_string(),
            "Key replacement service".to_string(),
            "Emergency accommodation".to_string(),
            "Cross-border coverage for SADC countries".to_string(),
            "Zero excess on glass claims".to_string(),
        ],
    }
}
