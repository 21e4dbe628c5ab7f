//! Currency conversion arithmetic.
//!
//! Rates are mid rates quoted as the PLN price of one unit of a currency.
//! Rounding to two places depends on direction:
//!
//! | direction | formula | rounding |
//! |---|---|---|
//! | PLN -> X | `amount / rate(X)` | half-down |
//! | X -> PLN | `amount * rate(X)` | half-up |
//! | X -> Y   | `amount * rate(X) / rate(Y)` | half-down |

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::currency::Currency;
use super::money::{Money, MoneyError, SCALE};

/// PLN price of one unit of `currency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(currency: Currency, rate: Decimal) -> Self {
        Self { currency, rate }
    }

    /// The base currency is always worth exactly one of itself.
    pub fn base() -> Self {
        Self::new(Currency::BASE, Decimal::ONE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    #[error("cannot exchange {0} to {0}")]
    SameCurrency(Currency),
    #[error("rate for {currency} must be positive, got {rate}")]
    NonPositiveRate { currency: Currency, rate: Decimal },
    #[error("exchange result overflowed")]
    Overflow,
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Convert `amount` of `from.currency` into `to.currency`.
pub fn convert(amount: Money, from: ExchangeRate, to: ExchangeRate) -> Result<Money, ExchangeError> {
    if from.currency == to.currency {
        return Err(ExchangeError::SameCurrency(from.currency));
    }
    for quote in [from, to] {
        if !quote.currency.is_base() && quote.rate <= Decimal::ZERO {
            return Err(ExchangeError::NonPositiveRate {
                currency: quote.currency,
                rate: quote.rate,
            });
        }
    }

    let value = amount.to_decimal();
    let converted = if from.currency.is_base() {
        value
            .checked_div(to.rate)
            .map(|v| v.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointTowardZero))
    } else if to.currency.is_base() {
        value
            .checked_mul(from.rate)
            .map(|v| v.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero))
    } else {
        value
            .checked_mul(from.rate)
            .and_then(|v| v.checked_div(to.rate))
            .map(|v| v.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointTowardZero))
    }
    .ok_or(ExchangeError::Overflow)?;

    Ok(Money::from_decimal(converted)?)
}
