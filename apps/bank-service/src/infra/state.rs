use std::sync::Arc;

use crate::config::db::DbKind;
use crate::config::exchange_rates::ExchangeRatesConfig;
use crate::config::outbox::OutboxConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::services::exchange_rates::{ExchangeRatesProvider, NbpExchangeRatesClient};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_kind: Option<DbKind>,
    rates: Option<Arc<dyn ExchangeRatesProvider>>,
    rates_config: ExchangeRatesConfig,
    outbox_config: OutboxConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_kind: None,
            rates: None,
            rates_config: ExchangeRatesConfig::default(),
            outbox_config: OutboxConfig::default(),
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Use a ready-made rates provider instead of the HTTP client.
    pub fn with_rates(mut self, rates: Arc<dyn ExchangeRatesProvider>) -> Self {
        self.rates = Some(rates);
        self
    }

    pub fn with_exchange_rates_config(mut self, config: ExchangeRatesConfig) -> Self {
        self.rates_config = config;
        self
    }

    pub fn with_outbox_config(mut self, config: OutboxConfig) -> Self {
        self.outbox_config = config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let rates = match self.rates {
            Some(rates) => rates,
            None => Arc::new(NbpExchangeRatesClient::new(self.rates_config)?),
        };

        let state = if let Some(kind) = self.db_kind {
            // single entrypoint: build + migrate
            let conn = bootstrap_db(kind).await?;
            AppState::new(conn, rates)
        } else {
            AppState::without_db(rates)
        };

        Ok(state.with_outbox(self.outbox_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
