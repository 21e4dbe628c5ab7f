//! Outbox repository: append domain events, read and acknowledge them.

use sea_orm::ConnectionTrait;

use crate::adapters::outbox_sea::{self as outbox_adapter, OutboxEventCreate};
use crate::domain::events::AccountEvent;
use crate::entities::outbox_events;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Outbox row as seen by the relay; `payload` is the JSON text written at append time.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxEvent {
    pub id: i64,
    pub aggregate_id: i64,
    pub event_type: String,
    pub payload: String,
    pub created_at: time::OffsetDateTime,
    pub published_at: Option<time::OffsetDateTime>,
}

impl OutboxEvent {
    pub fn decode(&self) -> Result<AccountEvent, DomainError> {
        serde_json::from_str(&self.payload).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("outbox event {} payload: {e}", self.id),
            )
        })
    }
}

/// Record `event` in the outbox. Call with the same transaction that
/// performs the state change the event describes.
pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event: &AccountEvent,
) -> Result<OutboxEvent, DomainError> {
    let payload = serde_json::to_string(event).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialize".into()),
            format!("serialize {}: {e}", event.event_type()),
        )
    })?;

    let model = outbox_adapter::append(
        conn,
        OutboxEventCreate {
            aggregate_id: event.aggregate_id(),
            event_type: event.event_type().to_string(),
            payload,
        },
    )
    .await?;
    Ok(OutboxEvent::from(model))
}

pub async fn fetch_unpublished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<OutboxEvent>, DomainError> {
    let models = outbox_adapter::find_unpublished(conn, limit).await?;
    Ok(models.into_iter().map(OutboxEvent::from).collect())
}

/// Returns false if the event was already marked (or does not exist).
pub async fn mark_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<bool, DomainError> {
    let rows =
        outbox_adapter::mark_published(conn, event_id, time::OffsetDateTime::now_utc()).await?;
    Ok(rows == 1)
}

pub async fn count_unpublished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, DomainError> {
    Ok(outbox_adapter::count_unpublished(conn).await?)
}

pub async fn find_for_aggregate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    aggregate_id: i64,
) -> Result<Vec<OutboxEvent>, DomainError> {
    let models = outbox_adapter::find_by_aggregate(conn, aggregate_id).await?;
    Ok(models.into_iter().map(OutboxEvent::from).collect())
}

impl From<outbox_events::Model> for OutboxEvent {
    fn from(model: outbox_events::Model) -> Self {
        Self {
            id: model.id,
            aggregate_id: model.aggregate_id,
            event_type: model.event_type,
            payload: model.payload,
            created_at: model.created_at,
            published_at: model.published_at,
        }
    }
}
