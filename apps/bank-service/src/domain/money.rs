//! Fixed-point money in minor units (hundredths).
//!
//! Balances are stored as `i64` minor units so both Postgres and SQLite keep
//! them exact; `rust_decimal::Decimal` is the boundary type for JSON and rate
//! arithmetic.

use std::fmt;
use std::ops::Neg;

use rust_decimal::Decimal;
use thiserror::Error;

/// Number of fraction digits carried by every amount.
pub const SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount has more than 2 fraction digits")]
    TooManyFractionDigits,
    #[error("amount is out of range")]
    OutOfRange,
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Exact conversion; trailing zeros are ignored, so `1.500` is accepted.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        let normalized = value.normalize();
        if normalized.scale() > SCALE {
            return Err(MoneyError::TooManyFractionDigits);
        }
        let mut rescaled = normalized;
        rescaled.rescale(SCALE);
        i64::try_from(rescaled.mantissa())
            .map(Money)
            .map_err(|_| MoneyError::OutOfRange)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}
