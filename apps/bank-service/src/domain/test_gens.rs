//! Proptest generators and config shared by the domain property tests.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::currency::Currency;
use super::exchange::ExchangeRate;
use super::money::Money;

/// Cases per property; `PROPTEST_CASES` overrides.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);

    ProptestConfig {
        failure_persistence: None,
        cases,
        ..ProptestConfig::default()
    }
}

pub fn foreign_currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Usd), Just(Currency::Eur)]
}

/// Positive amounts up to 10 million with cent precision.
pub fn amount() -> impl Strategy<Value = Money> {
    (1i64..=1_000_000_000).prop_map(Money::from_minor)
}

/// Mid rates between 0.0001 and 99.9999 with four fraction digits.
pub fn rate_for(currency: Currency) -> impl Strategy<Value = ExchangeRate> {
    (1i64..=999_999).prop_map(move |mantissa| ExchangeRate::new(currency, Decimal::new(mantissa, 4)))
}

pub fn foreign_rate() -> impl Strategy<Value = ExchangeRate> {
    foreign_currency().prop_flat_map(rate_for)
}
