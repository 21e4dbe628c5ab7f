//! Relays outbox rows to an [`EventPublisher`].
//!
//! Events are published in id order. A failed publish ends the tick so a
//! later event is never delivered before an earlier one; the failed event is
//! retried on the next tick. Delivery is at-least-once: a crash between
//! publishing and committing `published_at` republishes the event.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::outbox::OutboxConfig;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::outbox::{self, OutboxEvent};
use crate::state::app_state::AppState;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("broker unavailable: {0}")]
    Unavailable(String),
    #[error("event {event_id} rejected: {reason}")]
    Rejected { event_id: i64, reason: String },
}

/// Destination for outbox events (a message broker in production).
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &OutboxEvent) -> Result<(), PublishError>;
}

/// Writes each event as a structured log record.
#[derive(Debug, Clone)]
pub struct LogPublisher {
    topic: String,
}

impl LogPublisher {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

impl Default for LogPublisher {
    fn default() -> Self {
        Self::new("bank.account-events")
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &OutboxEvent) -> Result<(), PublishError> {
        info!(
            topic = %self.topic,
            event_id = event.id,
            key = event.aggregate_id,
            event_type = %event.event_type,
            payload = %event.payload,
            "event published"
        );
        Ok(())
    }
}

/// Outcome of one relay tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayReport {
    pub published: usize,
    /// True if the tick stopped at an event the publisher refused.
    pub stalled: bool,
}

pub struct OutboxRelay {
    state: AppState,
    publisher: Arc<dyn EventPublisher>,
    config: OutboxConfig,
}

impl OutboxRelay {
    pub fn new(state: AppState, publisher: Arc<dyn EventPublisher>, config: OutboxConfig) -> Self {
        Self {
            state,
            publisher,
            config,
        }
    }

    /// Publish one batch of pending events in a single transaction.
    pub async fn relay_once(&self) -> Result<RelayReport, AppError> {
        let publisher = Arc::clone(&self.publisher);
        let batch_size = self.config.batch_size;

        with_txn(None, &self.state, move |txn| {
            Box::pin(async move {
                let pending = outbox::fetch_unpublished(txn, batch_size).await?;
                let mut report = RelayReport::default();

                for event in &pending {
                    if let Err(e) = publisher.publish(event).await {
                        warn!(
                            event_id = event.id,
                            event_type = %event.event_type,
                            error = %e,
                            "outbox publish failed; retrying next tick"
                        );
                        report.stalled = true;
                        break;
                    }
                    if outbox::mark_published(txn, event.id).await? {
                        report.published += 1;
                    }
                }

                Ok(report)
            })
        })
        .await
    }

    /// Tick every `poll_interval` until `shutdown` flips to true.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            batch_size = self.config.batch_size,
            "outbox relay started"
        );

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.relay_once().await {
                        Ok(report) if report.published > 0 => {
                            debug!(published = report.published, stalled = report.stalled, "outbox tick");
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "outbox tick failed"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("outbox relay stopped");
    }
}
