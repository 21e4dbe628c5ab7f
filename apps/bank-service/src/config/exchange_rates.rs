use std::time::Duration;

use super::var_or;
use crate::error::AppError;

/// Settings for the NBP-style exchange rates API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRatesConfig {
    /// `EXCHANGE_RATES_BASE_URL`, without trailing slash
    pub base_url: String,
    /// `EXCHANGE_RATES_TABLE`, the rates table letter (A publishes mid rates)
    pub table: String,
    /// `EXCHANGE_RATES_TIMEOUT_MS`
    pub timeout: Duration,
}

impl Default for ExchangeRatesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nbp.pl".to_string(),
            table: "A".to_string(),
            timeout: Duration::from_millis(5000),
        }
    }
}

impl ExchangeRatesConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let base_url: String = var_or("EXCHANGE_RATES_BASE_URL", defaults.base_url)?;
        let table: String = var_or("EXCHANGE_RATES_TABLE", defaults.table)?;
        let timeout_ms: u64 = var_or("EXCHANGE_RATES_TIMEOUT_MS", 5000)?;

        if table.is_empty() {
            return Err(AppError::config("EXCHANGE_RATES_TABLE must not be empty"));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            table,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Same settings pointed at another host (tests, sandboxes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
