//! SeaORM adapter for customers.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, Set};

use crate::entities::customers;

pub mod dto;

pub use dto::CustomerCreate;

pub async fn create_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<customers::Model, sea_orm::DbErr> {
    let customer = customers::ActiveModel {
        id: NotSet,
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    customer.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find_by_id(customer_id).one(conn).await
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = customers::Entity::find_by_id(customer_id)
        .count(conn)
        .await?;
    Ok(count > 0)
}
