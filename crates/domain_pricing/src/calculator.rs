//! The premium calculator
//!
//! A pure function from (vehicle value, manufacture year, usage, tier) to a
//! structured premium breakdown. All monetary outputs are rounded to two
//! decimal places exactly once, when the breakdown is constructed; the factor
//! chain itself runs at full decimal precision so rounding error never
//! compounds.

use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};

use crate::error::PricingError;
use crate::rates::{PreviewWidgetRatePolicy, RatePolicy, VAT_RATE};
use crate::tier::{CoverageTier, UsageClass};

/// Oldest vehicle age the calculator accepts, in whole years
pub const MAX_VEHICLE_AGE_YEARS: i32 = 60;

/// Structured result of a premium calculation
///
/// Invariant: `total_premium_annual == base_premium_annual + vat_annual`,
/// where `vat_annual` is the rounded 16% of the rounded base. Because the
/// base carries exactly two decimals, this is identical to rounding
/// `base * 1.16` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    /// Annual base premium before tax
    pub base_premium_annual: Money,
    /// VAT charged on the base premium
    pub vat_annual: Money,
    /// Annual premium including VAT
    pub total_premium_annual: Money,
    /// One quarterly installment of the total premium
    pub quarterly_premium: Money,
    /// The VAT rate applied
    pub vat_rate: Rate,
}

/// Computes a premium breakdown using the current calendar year
///
/// See [`compute_premium_at`] for the calculation itself; this wrapper only
/// supplies today's year for the vehicle-age derivation.
pub fn compute_premium(
    policy: &dyn RatePolicy,
    vehicle_value: Money,
    vehicle_year: i32,
    usage: UsageClass,
    tier: CoverageTier,
) -> Result<PremiumBreakdown, PricingError> {
    compute_premium_at(
        policy,
        vehicle_value,
        vehicle_year,
        usage,
        tier,
        Utc::now().year(),
    )
}

/// Computes a premium breakdown against an explicit calendar year
///
/// `base = value * rate(tier) * age_factor * usage_factor`, VAT at 16%,
/// quarterly = total / 4. Pure and deterministic: identical inputs always
/// produce identical output.
///
/// # Errors
///
/// Returns [`PricingError::InvalidInput`] when the vehicle value is not
/// positive, or when the manufacture year is not a plausible 4-digit year
/// (in the future, or older than [`MAX_VEHICLE_AGE_YEARS`]).
pub fn compute_premium_at(
    policy: &dyn RatePolicy,
    vehicle_value: Money,
    vehicle_year: i32,
    usage: UsageClass,
    tier: CoverageTier,
    current_year: i32,
) -> Result<PremiumBreakdown, PricingError> {
    if !vehicle_value.is_positive() {
        return Err(PricingError::invalid_input(format!(
            "vehicle value must be positive, got {}",
            vehicle_value.amount()
        )));
    }

    let vehicle_age = current_year - vehicle_year;
    if !(1000..=9999).contains(&vehicle_year)
        || !(0..=MAX_VEHICLE_AGE_YEARS).contains(&vehicle_age)
    {
        return Err(PricingError::invalid_input(format!(
            "{vehicle_year} is not a plausible vehicle year"
        )));
    }

    let factor = policy.base_rate(tier).as_decimal()
        * policy.age_factor(vehicle_age)
        * policy.usage_factor(usage);

    // Single boundary rounding: the unrounded factor chain is rounded here
    // and every derived figure is built from already-rounded amounts.
    let base = vehicle_value.multiply(factor).round_to_currency();
    let vat = base.multiply(VAT_RATE).round_to_currency();
    let total = base.checked_add(&vat)?;
    let quarterly = total.divide(dec!(4))?.round_to_currency();

    tracing::debug!(
        policy = policy.name(),
        %tier,
        %usage,
        vehicle_age,
        total = %total,
        "premium computed"
    );

    Ok(PremiumBreakdown {
        base_premium_annual: base,
        vat_annual: vat,
        total_premium_annual: total,
        quarterly_premium: quarterly,
        vat_rate: Rate::new(VAT_RATE),
    })
}

/// Rough monthly premium shown by the estimator widget
///
/// Runs the same formula under [`PreviewWidgetRatePolicy`] and divides the
/// VAT-inclusive annual total by twelve.
pub fn estimate_monthly_premium(
    vehicle_value: Money,
    vehicle_year: i32,
    usage: UsageClass,
    tier: CoverageTier,
) -> Result<Money, PricingError> {
    let breakdown = compute_premium(
        &PreviewWidgetRatePolicy,
        vehicle_value,
        vehicle_year,
        usage,
        tier,
    )?;
    Ok(breakdown
        .total_premium_annual
        .divide(dec!(12))?
        .round_to_currency())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::rates::PrimaryRatePolicy;
    use core_kernel::Currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn any_tier() -> impl Strategy<Value = CoverageTier> {
        prop_oneof![
            Just(CoverageTier::Basic),
            Just(CoverageTier::Standard),
            Just(CoverageTier::Premium),
        ]
    }

    fn any_usage() -> impl Strategy<Value = UsageClass> {
        prop_oneof![
            Just(UsageClass::Personal),
            Just(UsageClass::Business),
            Just(UsageClass::Commercial),
        ]
    }

    proptest! {
        #[test]
        fn total_is_base_plus_sixteen_percent(
            value_minor in 100_000i64..10_000_000_000i64,
            age in 0i32..=MAX_VEHICLE_AGE_YEARS,
            tier in any_tier(),
            usage in any_usage(),
        ) {
            let current_year = 2026;
            let value = Money::from_minor(value_minor, Currency::ZMW);
            let breakdown = compute_premium_at(
                &PrimaryRatePolicy, value, current_year - age, usage, tier, current_year,
            ).unwrap();

            // total == round(base * 1.16, 2)
            let expected_total = breakdown
                .base_premium_annual
                .multiply(Decimal::new(116, 2))
                .round_to_currency();
            prop_assert_eq!(breakdown.total_premium_annual, expected_total);

            // quarterly == round(total / 4, 2)
            let expected_quarterly = breakdown
                .total_premium_annual
                .divide(Decimal::new(4, 0)).unwrap()
                .round_to_currency();
            prop_assert_eq!(breakdown.quarterly_premium, expected_quarterly);

            // all figures carry at most two decimals
            for money in [
                breakdown.base_premium_annual,
                breakdown.vat_annual,
                breakdown.total_premium_annual,
                breakdown.quarterly_premium,
            ] {
                prop_assert_eq!(money, money.round_to_currency());
            }
        }
    }
}
