//! SeaORM adapter for the transactional outbox.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::outbox_events;

pub mod dto;

pub use dto::OutboxEventCreate;

pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: OutboxEventCreate,
) -> Result<outbox_events::Model, sea_orm::DbErr> {
    let event = outbox_events::ActiveModel {
        id: NotSet,
        aggregate_id: Set(dto.aggregate_id),
        event_type: Set(dto.event_type),
        payload: Set(dto.payload),
        created_at: Set(OffsetDateTime::now_utc()),
        published_at: Set(None),
    };

    event.insert(conn).await
}

/// Oldest unpublished events first.
pub async fn find_unpublished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<outbox_events::Model>, sea_orm::DbErr> {
    outbox_events::Entity::find()
        .filter(outbox_events::Column::PublishedAt.is_null())
        .order_by_asc(outbox_events::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn mark_published<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
    published_at: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = outbox_events::Entity::update_many()
        .col_expr(
            outbox_events::Column::PublishedAt,
            Expr::value(Some(published_at)),
        )
        .filter(outbox_events::Column::Id.eq(event_id))
        .filter(outbox_events::Column::PublishedAt.is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

pub async fn count_unpublished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    outbox_events::Entity::find()
        .filter(outbox_events::Column::PublishedAt.is_null())
        .count(conn)
        .await
}

pub async fn find_by_aggregate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    aggregate_id: i64,
) -> Result<Vec<outbox_events::Model>, sea_orm::DbErr> {
    outbox_events::Entity::find()
        .filter(outbox_events::Column::AggregateId.eq(aggregate_id))
        .order_by_asc(outbox_events::Column::Id)
        .all(conn)
        .await
}
