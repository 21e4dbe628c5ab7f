use sea_orm::ConnectionTrait;
use tracing::debug;

use super::log_command_failure;
use crate::domain::{Currency, Money};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::accounts::{self, CurrencyAccount, NewAccount};

/// Accounts to open for a freshly created customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccountsRequest {
    pub customer_id: i64,
    pub main_currency: Currency,
    pub main_balance: Money,
    /// Opened with a zero balance, in this order.
    pub additional_currencies: Vec<Currency>,
}

impl NewAccountsRequest {
    fn accounts(&self) -> Vec<NewAccount> {
        let main = NewAccount {
            currency: self.main_currency,
            balance: self.main_balance,
            is_main_account: true,
        };
        let additional = self.additional_currencies.iter().map(|currency| NewAccount {
            currency: *currency,
            balance: Money::ZERO,
            is_main_account: false,
        });
        std::iter::once(main).chain(additional).collect()
    }
}

/// Currency account use cases.
pub struct AccountService;

impl AccountService {
    pub fn new() -> Self {
        Self
    }

    /// All accounts of a customer, main account first. Empty if the
    /// customer has none (or does not exist).
    pub async fn find_accounts_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer_id: i64,
    ) -> Result<Vec<CurrencyAccount>, AppError> {
        Ok(accounts::find_for_customer(conn, customer_id).await?)
    }

    /// Open the main account and the additional ones, returned in request order.
    pub async fn create_new_accounts<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        request: NewAccountsRequest,
    ) -> Result<Vec<CurrencyAccount>, AppError> {
        if request.main_balance.is_negative() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "Main account balance cannot be negative",
            ));
        }

        debug!(
            customer_id = request.customer_id,
            main_currency = %request.main_currency,
            additional = request.additional_currencies.len(),
            "opening currency accounts"
        );

        accounts::create_accounts(conn, request.customer_id, &request.accounts())
            .await
            .map_err(AppError::from)
            .inspect_err(|e| log_command_failure("create_new_accounts", e))
    }

    /// Add `delta` to the balance; a result below zero is refused.
    pub async fn update_amount_by<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer_id: i64,
        currency: Currency,
        delta: Money,
    ) -> Result<CurrencyAccount, AppError> {
        accounts::apply_delta(conn, customer_id, currency, delta)
            .await
            .map_err(AppError::from)
            .inspect_err(|e| log_command_failure("update_amount_by", e))
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}
