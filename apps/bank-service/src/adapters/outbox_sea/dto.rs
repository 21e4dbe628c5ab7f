//! DTOs for outbox_sea adapter.

/// DTO for appending an event to the outbox.
#[derive(Debug, Clone)]
pub struct OutboxEventCreate {
    pub aggregate_id: i64,
    pub event_type: String,
    /// Serialized JSON payload
    pub payload: String,
}
