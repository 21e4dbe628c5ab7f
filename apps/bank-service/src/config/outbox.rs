use std::time::Duration;

use super::var_or;
use crate::error::AppError;

/// Outbox relay cadence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxConfig {
    pub poll_interval: Duration,
    pub batch_size: u64,
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            batch_size: 100,
        }
    }
}

impl OutboxConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let poll_ms: u64 = var_or("OUTBOX_POLL_INTERVAL_MS", 1000)?;
        let batch_size: u64 = var_or("OUTBOX_BATCH_SIZE", 100)?;

        if poll_ms == 0 || batch_size == 0 {
            return Err(AppError::config(
                "OUTBOX_POLL_INTERVAL_MS and OUTBOX_BATCH_SIZE must be positive",
            ));
        }

        Ok(Self {
            poll_interval: Duration::from_millis(poll_ms),
            batch_size,
        })
    }
}
