use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::outbox::OutboxConfig;
use crate::services::exchange_rates::ExchangeRatesProvider;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent only in tests that exercise the error path)
    pub db: Option<DatabaseConnection>,
    /// Exchange rate source used by the exchange command
    pub rates: Arc<dyn ExchangeRatesProvider>,
    /// Relay cadence, read by `main` when spawning the outbox relay
    pub outbox: OutboxConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, rates: Arc<dyn ExchangeRatesProvider>) -> Self {
        Self {
            db: Some(db),
            rates,
            outbox: OutboxConfig::default(),
        }
    }

    pub fn without_db(rates: Arc<dyn ExchangeRatesProvider>) -> Self {
        Self {
            db: None,
            rates,
            outbox: OutboxConfig::default(),
        }
    }

    pub fn with_outbox(mut self, outbox: OutboxConfig) -> Self {
        self.outbox = outbox;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn rates(&self) -> Arc<dyn ExchangeRatesProvider> {
        Arc::clone(&self.rates)
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("outbox", &self.outbox)
            .finish_non_exhaustive()
    }
}
