//! SeaORM adapter for currency accounts.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::currency_accounts;

pub mod dto;

pub use dto::{AccountCreate, BalanceDelta};

pub async fn find_by_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<Vec<currency_accounts::Model>, sea_orm::DbErr> {
    currency_accounts::Entity::find()
        .filter(currency_accounts::Column::CustomerId.eq(customer_id))
        .order_by_desc(currency_accounts::Column::IsMainAccount)
        .order_by_asc(currency_accounts::Column::Currency)
        .all(conn)
        .await
}

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
    currency: &str,
) -> Result<Option<currency_accounts::Model>, sea_orm::DbErr> {
    currency_accounts::Entity::find_by_id((customer_id, currency.to_string()))
        .one(conn)
        .await
}

/// Insert accounts one by one, preserving input order in the result.
pub async fn create_accounts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dtos: Vec<AccountCreate>,
) -> Result<Vec<currency_accounts::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut created = Vec::with_capacity(dtos.len());

    for dto in dtos {
        let account = currency_accounts::ActiveModel {
            customer_id: Set(dto.customer_id),
            currency: Set(dto.currency),
            balance_minor: Set(dto.balance_minor),
            is_main_account: Set(dto.is_main_account),
            created_at: Set(now),
            updated_at: Set(now),
        };
        created.push(account.insert(conn).await?);
    }

    Ok(created)
}

/// Atomically apply `delta_minor` unless the balance would drop below zero.
///
/// Returns the number of rows updated: 0 when the account is missing or the
/// guard rejected the change.
pub async fn apply_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: BalanceDelta,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = currency_accounts::Entity::update_many()
        .col_expr(
            currency_accounts::Column::BalanceMinor,
            Expr::col(currency_accounts::Column::BalanceMinor).add(dto.delta_minor),
        )
        .col_expr(currency_accounts::Column::UpdatedAt, Expr::value(now))
        .filter(currency_accounts::Column::CustomerId.eq(dto.customer_id))
        .filter(currency_accounts::Column::Currency.eq(dto.currency))
        // balance + delta >= 0
        .filter(currency_accounts::Column::BalanceMinor.gte(-dto.delta_minor))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
