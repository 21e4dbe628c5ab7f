//! Currency account repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::currency_accounts_sea::{self as accounts_adapter, AccountCreate, BalanceDelta};
use crate::domain::{Currency, Money};
use crate::entities::currency_accounts;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Currency account domain model
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyAccount {
    pub customer_id: i64,
    pub currency: Currency,
    pub balance: Money,
    pub is_main_account: bool,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

/// Account to open for a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub currency: Currency,
    pub balance: Money,
    pub is_main_account: bool,
}

/// Main account first, then currency declaration order.
pub fn sort_for_display(accounts: &mut [CurrencyAccount]) {
    accounts.sort_by_key(|a| (!a.is_main_account, a.currency));
}

pub async fn find_for_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<Vec<CurrencyAccount>, DomainError> {
    let models = accounts_adapter::find_by_customer(conn, customer_id).await?;
    let mut accounts = models
        .into_iter()
        .map(CurrencyAccount::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    sort_for_display(&mut accounts);
    Ok(accounts)
}

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
    currency: Currency,
) -> Result<Option<CurrencyAccount>, DomainError> {
    accounts_adapter::find_one(conn, customer_id, currency.code())
        .await?
        .map(CurrencyAccount::try_from)
        .transpose()
}

pub async fn create_accounts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
    accounts: &[NewAccount],
) -> Result<Vec<CurrencyAccount>, DomainError> {
    let dtos = accounts
        .iter()
        .map(|a| AccountCreate {
            customer_id,
            currency: a.currency.code().to_string(),
            balance_minor: a.balance.minor(),
            is_main_account: a.is_main_account,
        })
        .collect();

    accounts_adapter::create_accounts(conn, dtos)
        .await?
        .into_iter()
        .map(CurrencyAccount::try_from)
        .collect()
}

/// Add `delta` (possibly negative) to one account and return the new state.
///
/// The update is a single guarded statement, so concurrent debits cannot
/// overdraw the account. A rejected update is told apart from a missing
/// account by re-reading the row.
pub async fn apply_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
    currency: Currency,
    delta: Money,
) -> Result<CurrencyAccount, DomainError> {
    let updated = accounts_adapter::apply_delta(
        conn,
        BalanceDelta {
            customer_id,
            currency: currency.code().to_string(),
            delta_minor: delta.minor(),
        },
    )
    .await?;

    let account = find_one(conn, customer_id, currency)
        .await?
        .ok_or_else(|| DomainError::account_not_found(customer_id, currency))?;

    if updated == 0 {
        return Err(DomainError::insufficient_funds(format!(
            "Balance of {currency} account cannot go below zero"
        )));
    }

    Ok(account)
}

impl TryFrom<currency_accounts::Model> for CurrencyAccount {
    type Error = DomainError;

    fn try_from(model: currency_accounts::Model) -> Result<Self, Self::Error> {
        let currency = model.currency.parse::<Currency>().map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("currency_accounts row for customer {}: {e}", model.customer_id),
            )
        })?;

        Ok(Self {
            customer_id: model.customer_id,
            currency,
            balance: Money::from_minor(model.balance_minor),
            is_main_account: model.is_main_account,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
