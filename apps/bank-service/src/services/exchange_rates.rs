//! Exchange rate lookups.
//!
//! [`ExchangeRatesProvider`] is the seam services depend on; the shipped
//! implementation talks to an NBP-style HTTP API:
//!
//! `GET {base_url}/api/exchangerates/rates/{table}/{code}/` returning
//! `{"code": "EUR", "rates": [{"mid": 4.2737, ...}]}`.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::exchange_rates::ExchangeRatesConfig;
use crate::domain::{Currency, ExchangeRate};
use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Source of current mid rates, quoted in PLN.
#[async_trait]
pub trait ExchangeRatesProvider: Send + Sync {
    async fn fetch_current_rate(&self, currency: Currency) -> Result<ExchangeRate, DomainError>;
}

/// Resolve a rate, answering the base currency locally.
pub async fn rate_for(
    provider: &dyn ExchangeRatesProvider,
    currency: Currency,
) -> Result<ExchangeRate, DomainError> {
    if currency.is_base() {
        return Ok(ExchangeRate::base());
    }
    provider.fetch_current_rate(currency).await
}

#[derive(Debug, Deserialize)]
struct RatesTable {
    rates: Vec<RateEntry>,
}

#[derive(Debug, Deserialize)]
struct RateEntry {
    mid: Decimal,
}

/// HTTP client for the NBP exchange rates API.
#[derive(Debug, Clone)]
pub struct NbpExchangeRatesClient {
    http: reqwest::Client,
    config: ExchangeRatesConfig,
}

impl NbpExchangeRatesClient {
    pub fn new(config: ExchangeRatesConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build exchange rates client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn rate_url(&self, currency: Currency) -> String {
        format!(
            "{}/api/exchangerates/rates/{}/{}/",
            self.config.base_url,
            self.config.table,
            currency.code()
        )
    }

    fn unavailable(currency: Currency) -> DomainError {
        DomainError::upstream(format!("Error fetching exchange rate for {currency}"))
    }
}

#[async_trait]
impl ExchangeRatesProvider for NbpExchangeRatesClient {
    async fn fetch_current_rate(&self, currency: Currency) -> Result<ExchangeRate, DomainError> {
        if currency.is_base() {
            return Ok(ExchangeRate::base());
        }

        let url = self.rate_url(currency);
        debug!(%currency, %url, "fetching exchange rate");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(%currency, error = %e, "exchange rate request failed");
                Self::unavailable(currency)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%currency, status = status.as_u16(), "exchange rate request rejected");
            return Err(Self::unavailable(currency));
        }

        let table: RatesTable = response.json().await.map_err(|e| {
            warn!(%currency, error = %e, "exchange rate response malformed");
            Self::unavailable(currency)
        })?;

        let mid = table
            .rates
            .first()
            .map(|entry| entry.mid)
            .filter(|mid| *mid > Decimal::ZERO)
            .ok_or_else(|| {
                warn!(%currency, "exchange rate response carried no usable rate");
                Self::unavailable(currency)
            })?;

        Ok(ExchangeRate::new(currency, mid))
    }
}
