use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported account currencies. Declaration order is the display order of
/// a customer's accounts after the main one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Pln,
    Usd,
    Eur,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency code '{0}'")]
pub struct UnknownCurrency(pub String);

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Pln, Currency::Usd, Currency::Eur];

    /// Rates are quoted in this currency.
    pub const BASE: Currency = Currency::Pln;

    /// Main account currency when a customer does not pick one.
    pub const DEFAULT_MAIN: Currency = Currency::Pln;

    pub const fn code(self) -> &'static str {
        match self {
            Currency::Pln => "PLN",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn is_base(self) -> bool {
        self == Self::BASE
    }

    /// Every currency except `main`, in declaration order.
    pub fn others(main: Currency) -> Vec<Currency> {
        Self::ALL.into_iter().filter(|c| *c != main).collect()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLN" => Ok(Currency::Pln),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(UnknownCurrency(other.to_string())),
        }
    }
}
