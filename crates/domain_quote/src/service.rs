//! The quote service
//!
//! Orchestrates the premium calculator for the two quoting modes. Both modes
//! price through the same [`RatePolicy`] and the same boundary rounding, so
//! the live preview a user watches never disagrees with the final quote.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use core_kernel::{IdSource, PersistencePort, RandomIdSource};
use domain_pricing::{
    compute_premium, CoverageTier, PremiumBreakdown, PrimaryRatePolicy, RatePolicy, UsageClass,
};

use crate::error::QuoteError;
use crate::history::{
    push_entry, read_entries, QuoteHistoryEntry, QUOTE_HISTORY_KEY, QUOTE_HISTORY_LIMIT,
};
use crate::quote::Quote;
use crate::request::{QuoteDraft, QuoteRequest};

/// Default simulated network latency for the full-quote path
const DEFAULT_NETWORK_DELAY: Duration = Duration::from_secs(1);

/// Orchestrates full quotes and quick previews
///
/// The full-quote path awaits a simulated network delay and is
/// fire-to-completion: once started it always resolves, even if the caller
/// has moved on. Callers must be prepared to discard late results.
pub struct QuoteService {
    policy: Arc<dyn RatePolicy>,
    ids: Arc<dyn IdSource>,
    store: Arc<dyn PersistencePort>,
    network_delay: Duration,
}

impl QuoteService {
    /// Creates a service with the primary rate policy and random ids
    pub fn new(store: Arc<dyn PersistencePort>) -> Self {
        Self {
            policy: Arc::new(PrimaryRatePolicy),
            ids: Arc::new(RandomIdSource),
            store,
            network_delay: DEFAULT_NETWORK_DELAY,
        }
    }

    /// Substitutes the identifier source (deterministic ids in tests)
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Overrides the simulated network delay
    pub fn with_network_delay(mut self, delay: Duration) -> Self {
        self.network_delay = delay;
        self
    }

    /// Generates a full quote from a draft
    ///
    /// Validates completeness first, so the calculator never receives an
    /// incomplete request, then prices the request and attaches identifier,
    /// narrative, and the 30-day validity window.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::IncompleteRequest`] naming the first missing field
    /// - [`QuoteError::Pricing`] when the calculator rejects the inputs
    pub async fn generate_full_quote(&self, draft: QuoteDraft) -> Result<Quote, QuoteError> {
        let request = draft.finalize()?;

        // Simulated network latency. No cancellation: a started request
        // always completes.
        tokio::time::sleep(self.network_delay).await;

        let breakdown = compute_premium(
            self.policy.as_ref(),
            request.vehicle_value,
            request.vehicle_year,
            request.usage,
            request.coverage_tier,
        )?;

        let quote = Quote::issue(self.ids.quote_id(), &request, breakdown, Utc::now());

        tracing::info!(
            quote_id = %quote.quote_id,
            tier = %quote.coverage_tier,
            total = %quote.breakdown.total_premium_annual,
            valid_until = %quote.valid_until,
            "full quote generated"
        );

        self.record_quote(&quote, &request).await;

        Ok(quote)
    }

    /// Prices a partial draft for live feedback
    ///
    /// Returns `Ok(None)` while vehicle value or tier is missing - a valid
    /// "not enough data yet" state, not a failure. Absent usage defaults to
    /// personal and absent year to the current calendar year.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Pricing`] when the present inputs are invalid
    /// (e.g. a non-positive value typed into the form).
    pub fn quick_preview(
        &self,
        draft: &QuoteDraft,
    ) -> Result<Option<PremiumBreakdown>, QuoteError> {
        let (Some(vehicle_value), Some(tier)) = (draft.vehicle_value, draft.coverage_tier)
        else {
            return Ok(None);
        };

        let usage = draft.usage.unwrap_or(UsageClass::Personal);
        let vehicle_year = draft
            .vehicle_year
            .unwrap_or_else(|| chrono::Datelike::year(&Utc::now()));

        let breakdown = compute_premium(
            self.policy.as_ref(),
            vehicle_value,
            vehicle_year,
            usage,
            tier,
        )?;
        Ok(Some(breakdown))
    }

    /// Prices one tier of the draft, for side-by-side tier comparison
    ///
    /// Same preview semantics, with the tier forced rather than read from
    /// the draft.
    pub fn preview_for_tier(
        &self,
        draft: &QuoteDraft,
        tier: CoverageTier,
    ) -> Result<Option<PremiumBreakdown>, QuoteError> {
        let mut draft = draft.clone();
        draft.coverage_tier = Some(tier);
        self.quick_preview(&draft)
    }

    /// Returns the remembered quotes, newest first
    pub async fn quote_history(&self) -> Vec<QuoteHistoryEntry> {
        read_entries(self.store.as_ref(), QUOTE_HISTORY_KEY).await
    }

    /// Remembers a quote in device history, trimming to the retention limit
    async fn record_quote(&self, quote: &Quote, request: &QuoteRequest) {
        let entry = QuoteHistoryEntry {
            quote: quote.clone(),
            request: request.clone(),
            recorded_at: Utc::now(),
        };
        push_entry(
            self.store.as_ref(),
            QUOTE_HISTORY_KEY,
            entry,
            QUOTE_HISTORY_LIMIT,
        )
        .await;
    }
}
