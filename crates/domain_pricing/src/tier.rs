//! Coverage tiers and vehicle usage classes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// The three coverage tiers sold by the quoting tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageTier {
    /// Third-party only, the legal minimum
    Basic,
    /// Comprehensive cover
    Standard,
    /// Comprehensive plus extras
    Premium,
}

impl CoverageTier {
    /// All tiers in ascending order of cover
    pub fn all() -> [CoverageTier; 3] {
        [
            CoverageTier::Basic,
            CoverageTier::Standard,
            CoverageTier::Premium,
        ]
    }

    /// The product name shown to customers
    pub fn display_name(&self) -> &'static str {
        match self {
            CoverageTier::Basic => "Third Party",
            CoverageTier::Standard => "Comprehensive",
            CoverageTier::Premium => "Premium Plus",
        }
    }
}

impl fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoverageTier::Basic => "basic",
            CoverageTier::Standard => "standard",
            CoverageTier::Premium => "premium",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CoverageTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(CoverageTier::Basic),
            "standard" => Ok(CoverageTier::Standard),
            "premium" => Ok(CoverageTier::Premium),
            other => Err(PricingError::invalid_input(format!(
                "unknown coverage tier: {other}"
            ))),
        }
    }
}

/// How the insured vehicle is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageClass {
    /// Private personal use
    Personal,
    /// Business use by the owner
    Business,
    /// Commercial operation (taxis, haulage, fleets)
    Commercial,
}

impl fmt::Display for UsageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UsageClass::Personal => "personal",
            UsageClass::Business => "business",
            UsageClass::Commercial => "commercial",
        };
        write!(f, "{s}")
    }
}

impl FromStr for UsageClass {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(UsageClass::Personal),
            "business" => Ok(UsageClass::Business),
            "commercial" => Ok(UsageClass::Commercial),
            other => Err(PricingError::invalid_input(format!(
                "unknown usage class: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_round_trips_through_str() {
        for tier in CoverageTier::all() {
            let parsed: CoverageTier = tier.to_string().parse().unwrap();
            assert_eq!(tier, parsed);
        }
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        let result: Result<CoverageTier, _> = "platinum".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_usage_round_trips_through_str() {
        for usage in [
            UsageClass::Personal,
            UsageClass::Business,
            UsageClass::Commercial,
        ] {
            let parsed: UsageClass = usage.to_string().parse().unwrap();
            assert_eq!(usage, parsed);
        }
    }
}
