use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bank_service::domain::{Currency, ExchangeRate};
use bank_service::errors::domain::DomainError;
use bank_service::services::exchange_rates::ExchangeRatesProvider;
use rust_decimal::Decimal;

/// In-process rates provider. Unknown currencies fail like the HTTP client.
#[derive(Debug, Default)]
pub struct StubRates {
    rates: HashMap<Currency, Decimal>,
    calls: AtomicUsize,
}

impl StubRates {
    /// EUR 4.2737, USD 4.1658
    pub fn sample() -> Arc<Self> {
        Arc::new(Self {
            rates: HashMap::from([
                (Currency::Eur, Decimal::from_str("4.2737").expect("rate")),
                (Currency::Usd, Decimal::from_str("4.1658").expect("rate")),
            ]),
            calls: AtomicUsize::new(0),
        })
    }

    /// Every lookup fails.
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeRatesProvider for StubRates {
    async fn fetch_current_rate(&self, currency: Currency) -> Result<ExchangeRate, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rates
            .get(&currency)
            .map(|rate| ExchangeRate::new(currency, *rate))
            .ok_or_else(|| {
                DomainError::upstream(format!("Error fetching exchange rate for {currency}"))
            })
    }
}
