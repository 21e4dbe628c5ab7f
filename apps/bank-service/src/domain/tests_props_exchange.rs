//! Property tests for exchange arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::exchange::{convert, ExchangeRate};
use super::money::Money;
use super::test_gens;

fn half_cent() -> Decimal {
    Decimal::new(5, 3)
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Property: converting into PLN lands within half a cent of the exact product.
    #[test]
    fn prop_to_base_is_within_half_cent(
        amount in test_gens::amount(),
        rate in test_gens::foreign_rate(),
    ) {
        let got = convert(amount, rate, ExchangeRate::base()).unwrap();
        let exact = amount.to_decimal() * rate.rate;
        prop_assert!((got.to_decimal() - exact).abs() <= half_cent());
    }

    /// Property: converting out of PLN lands within half a cent of the exact quotient.
    #[test]
    fn prop_from_base_is_within_half_cent(
        amount in test_gens::amount(),
        rate in test_gens::foreign_rate(),
    ) {
        let got = convert(amount, ExchangeRate::base(), rate).unwrap();
        let exact = amount.to_decimal() / rate.rate;
        prop_assert!((got.to_decimal() - exact).abs() <= half_cent());
    }

    /// Property: more money in never yields less money out.
    #[test]
    fn prop_conversion_is_monotonic(
        a in test_gens::amount(),
        b in test_gens::amount(),
        rate in test_gens::foreign_rate(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_out = convert(lo, ExchangeRate::base(), rate).unwrap();
        let hi_out = convert(hi, ExchangeRate::base(), rate).unwrap();
        prop_assert!(lo_out <= hi_out);
    }

    /// Property: results are never negative for positive input.
    #[test]
    fn prop_result_is_non_negative(
        amount in test_gens::amount(),
        rate in test_gens::foreign_rate(),
    ) {
        let out = convert(amount, rate, ExchangeRate::base()).unwrap();
        prop_assert!(out >= Money::ZERO);
    }
}
