//! Rate tables for premium calculation
//!
//! A [`RatePolicy`] maps coverage tier, vehicle age, and usage class to the
//! multipliers of the premium formula. Two policies exist and must stay
//! distinct; see the crate docs for why they are not unified.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Rate;

use crate::tier::{CoverageTier, UsageClass};

/// Flat VAT rate applied to the base premium (16%)
pub const VAT_RATE: Decimal = dec!(0.16);

/// A named table of pricing multipliers
///
/// Implementations must be pure: the same inputs always yield the same
/// factors.
pub trait RatePolicy: Send + Sync {
    /// Stable name of this policy, for logs and audit
    fn name(&self) -> &'static str;

    /// Base annual rate as a fraction of vehicle value
    fn base_rate(&self, tier: CoverageTier) -> Rate;

    /// Multiplier for vehicle age in whole years
    fn age_factor(&self, vehicle_age: i32) -> Decimal;

    /// Multiplier for the vehicle's usage class
    fn usage_factor(&self, usage: UsageClass) -> Decimal;
}

/// Base annual rates shared by both policies
fn base_rate(tier: CoverageTier) -> Rate {
    match tier {
        CoverageTier::Basic => Rate::new(dec!(0.015)),
        CoverageTier::Standard => Rate::new(dec!(0.035)),
        CoverageTier::Premium => Rate::new(dec!(0.045)),
    }
}

/// Rate policy used by the quote engine and the live quick preview
///
/// New vehicles (age <= 1) carry a 20% loading, vehicles of 10 years or
/// older earn a 10% discount.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryRatePolicy;

impl RatePolicy for PrimaryRatePolicy {
    fn name(&self) -> &'static str {
        "primary"
    }

    fn base_rate(&self, tier: CoverageTier) -> Rate {
        base_rate(tier)
    }

    fn age_factor(&self, vehicle_age: i32) -> Decimal {
        if vehicle_age <= 1 {
            dec!(1.2)
        } else if vehicle_age >= 10 {
            dec!(0.9)
        } else {
            dec!(1.0)
        }
    }

    fn usage_factor(&self, usage: UsageClass) -> Decimal {
        match usage {
            UsageClass::Personal => dec!(1.0),
            UsageClass::Business => dec!(1.3),
            UsageClass::Commercial => dec!(1.8),
        }
    }
}

/// Rate policy used by the standalone estimator widget
///
/// Finer age banding and softer usage loadings than the primary policy.
/// The divergence is known and preserved: the widget shows a rough monthly
/// figure, and changing either table changes prices users already saw.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewWidgetRatePolicy;

impl RatePolicy for PreviewWidgetRatePolicy {
    fn name(&self) -> &'static str {
        "preview-widget"
    }

    fn base_rate(&self, tier: CoverageTier) -> Rate {
        base_rate(tier)
    }

    fn age_factor(&self, vehicle_age: i32) -> Decimal {
        if vehicle_age <= 3 {
            dec!(1.1)
        } else if (9..=15).contains(&vehicle_age) {
            dec!(0.9)
        } else if vehicle_age > 15 {
            dec!(0.8)
        } else {
            dec!(1.0)
        }
    }

    fn usage_factor(&self, usage: UsageClass) -> Decimal {
        match usage {
            UsageClass::Personal => dec!(1.0),
            UsageClass::Business => dec!(1.2),
            UsageClass::Commercial => dec!(1.5),
        }
    }
}
