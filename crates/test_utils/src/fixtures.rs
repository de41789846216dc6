//! Common fixtures

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};

/// Money in the system currency
pub fn zmw(amount: Decimal) -> Money {
    Money::new(amount, Currency::ZMW)
}

/// The current calendar year
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// A fixed, known instant for deterministic timestamps
pub fn known_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}
