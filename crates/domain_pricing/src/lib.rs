//! Pricing Domain
//!
//! This crate implements the premium calculation engine for the motor
//! quoting core: coverage tiers, usage classes, the rate policies, and the
//! pure premium calculator.
//!
//! # Rate Policies
//!
//! Two named rate policies coexist deliberately:
//!
//! - [`PrimaryRatePolicy`] prices the quote engine and the live quick
//!   preview, so the preview a user watches while typing always matches the
//!   final quote.
//! - [`PreviewWidgetRatePolicy`] prices the standalone estimator widget with
//!   finer age bands and softer usage loadings.
//!
//! The two tables disagree on purpose: unifying them would silently change
//! user-facing prices, so each call site keeps its own policy until the
//! discrepancy gets a business ruling.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_pricing::{compute_premium, CoverageTier, PrimaryRatePolicy, UsageClass};
//!
//! let breakdown = compute_premium(
//!     &PrimaryRatePolicy,
//!     Money::new(dec!(50000), Currency::ZMW),
//!     2025,
//!     UsageClass::Personal,
//!     CoverageTier::Standard,
//! )?;
//! ```

pub mod calculator;
pub mod error;
pub mod rates;
pub mod tier;

pub use calculator::{
    compute_premium, compute_premium_at, estimate_monthly_premium, PremiumBreakdown,
    MAX_VEHICLE_AGE_YEARS,
};
pub use error::PricingError;
pub use rates::{PreviewWidgetRatePolicy, PrimaryRatePolicy, RatePolicy, VAT_RATE};
pub use tier::{CoverageTier, UsageClass};
