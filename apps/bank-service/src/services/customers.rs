use sea_orm::ConnectionTrait;
use tracing::info;

use super::accounts::{AccountService, NewAccountsRequest};
use super::log_command_failure;
use crate::domain::events::{AccountEvent, OpenedAccount};
use crate::domain::{Currency, Money};
use crate::error::AppError;
use crate::repos::accounts::CurrencyAccount;
use crate::repos::customers::{self, Customer};
use crate::repos::outbox;

/// Validated input for opening a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub main_balance: Money,
    /// `None` means the default main currency.
    pub main_currency: Option<Currency>,
    /// Empty means "every currency except the main one".
    pub additional_currencies: Vec<Currency>,
}

/// A customer together with their accounts, main account first.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerView {
    pub customer: Customer,
    pub accounts: Vec<CurrencyAccount>,
}

/// Currencies to open next to the main account.
///
/// The main currency and repeats are dropped from `requested`, keeping the
/// first occurrence; an empty request opens every other currency.
pub fn additional_currencies(main: Currency, requested: &[Currency]) -> Vec<Currency> {
    if requested.is_empty() {
        return Currency::others(main);
    }
    let mut picked = Vec::with_capacity(requested.len());
    for currency in requested {
        if *currency != main && !picked.contains(currency) {
            picked.push(*currency);
        }
    }
    picked
}

/// Customer use cases.
pub struct CustomerService;

impl CustomerService {
    pub fn new() -> Self {
        Self
    }

    pub async fn fetch_customer<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer_id: i64,
    ) -> Result<CustomerView, AppError> {
        load_view(conn, customer_id)
            .await
            .inspect_err(|e| log_command_failure("fetch_customer", e))
    }

    /// Insert the customer and their accounts and record `CustomerCreated`,
    /// all on `conn`. Run it inside one transaction.
    pub async fn create_customer<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        new_customer: NewCustomer,
    ) -> Result<CustomerView, AppError> {
        self.create(conn, new_customer)
            .await
            .inspect_err(|e| log_command_failure("create_customer", e))
    }

    async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        new_customer: NewCustomer,
    ) -> Result<CustomerView, AppError> {
        let main_currency = new_customer
            .main_currency
            .unwrap_or(Currency::DEFAULT_MAIN);
        let additional = additional_currencies(main_currency, &new_customer.additional_currencies);

        let customer =
            customers::create_customer(conn, &new_customer.first_name, &new_customer.last_name)
                .await?;

        let accounts = AccountService::new()
            .create_new_accounts(
                conn,
                NewAccountsRequest {
                    customer_id: customer.id,
                    main_currency,
                    main_balance: new_customer.main_balance,
                    additional_currencies: additional,
                },
            )
            .await?;

        outbox::append(
            conn,
            &AccountEvent::CustomerCreated {
                customer_id: customer.id,
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                accounts: accounts
                    .iter()
                    .map(|a| OpenedAccount {
                        currency: a.currency,
                        balance: a.balance.to_decimal(),
                        is_main_account: a.is_main_account,
                    })
                    .collect(),
            },
        )
        .await?;

        info!(
            customer_id = customer.id,
            main_currency = %main_currency,
            accounts = accounts.len(),
            "customer created"
        );

        Ok(CustomerView { customer, accounts })
    }
}

impl Default for CustomerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Customer plus sorted accounts; a missing customer is `CUSTOMER_NOT_FOUND`.
pub(crate) async fn load_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<CustomerView, AppError> {
    let customer = customers::require(conn, customer_id).await?;
    let accounts = AccountService::new()
        .find_accounts_for(conn, customer_id)
        .await?;
    Ok(CustomerView { customer, accounts })
}
