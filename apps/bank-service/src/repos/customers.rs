//! Customer repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::customers_sea::{self as customers_adapter, CustomerCreate};
use crate::errors::domain::DomainError;

/// Customer domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: time::OffsetDateTime,
}

pub async fn create_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    first_name: &str,
    last_name: &str,
) -> Result<Customer, DomainError> {
    let customer =
        customers_adapter::create_customer(conn, CustomerCreate::new(first_name, last_name))
            .await?;
    Ok(Customer::from(customer))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<Option<Customer>, DomainError> {
    let customer = customers_adapter::find_by_id(conn, customer_id).await?;
    Ok(customer.map(Customer::from))
}

/// Like [`find_by_id`] but a missing customer is a `NotFound` error.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<Customer, DomainError> {
    find_by_id(conn, customer_id)
        .await?
        .ok_or_else(|| DomainError::customer_not_found(customer_id))
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<bool, DomainError> {
    Ok(customers_adapter::exists(conn, customer_id).await?)
}

impl From<crate::entities::customers::Model> for Customer {
    fn from(model: crate::entities::customers::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
        }
    }
}
