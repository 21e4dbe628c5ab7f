//! Currency exchange between two accounts of one customer.
//!
//! An exchange runs in three steps so that no transaction stays open while
//! rates are fetched over the network:
//!
//! 1. [`ExchangeService::prepare`] reads customer and accounts and checks the
//!    balance;
//! 2. [`ExchangeService::quote`] fetches rates and computes the credit;
//! 3. [`ExchangeService::settle`] applies the guarded debit and the credit and
//!    records `CurrencyExchanged`, in one transaction.
//!
//! The debit in step 3 re-checks the balance, so a concurrent exchange that
//! drained the account between steps fails with `INSUFFICIENT_FUNDS`.

use std::sync::Arc;

use sea_orm::ConnectionTrait;
use tracing::info;

use super::customers::{load_view, CustomerView};
use super::exchange_rates::{rate_for, ExchangeRatesProvider};
use super::log_command_failure;
use crate::domain::events::AccountEvent;
use crate::domain::exchange::{convert, ExchangeError};
use crate::domain::{Currency, ExchangeRate, Money};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::repos::{accounts, outbox};

/// What the customer asked for: sell `amount` of `from`, buy `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeOrder {
    pub from: Currency,
    pub to: Currency,
    pub amount: Money,
}

/// An order checked against the customer's accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreparedExchange {
    pub customer_id: i64,
    pub order: ExchangeOrder,
}

/// A prepared exchange priced with current rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeQuote {
    pub customer_id: i64,
    pub from: ExchangeRate,
    pub to: ExchangeRate,
    pub debit: Money,
    pub credit: Money,
}

fn not_enough(currency: Currency) -> DomainError {
    DomainError::insufficient_funds(format!(
        "Not enough amount for exchanging from {currency} currency"
    ))
}

impl From<ExchangeError> for AppError {
    fn from(e: ExchangeError) -> Self {
        match e {
            ExchangeError::SameCurrency(_) => AppError::bad_request(ErrorCode::InvalidExchange, e.to_string()),
            ExchangeError::NonPositiveRate { .. } => {
                AppError::upstream(ErrorCode::ExchangeRatesUnavailable, e.to_string())
            }
            ExchangeError::Overflow | ExchangeError::Money(_) => {
                AppError::unprocessable(ErrorCode::InvalidExchange, e.to_string())
            }
        }
    }
}

/// Exchange use cases; cheap to clone into `with_txn` closures.
#[derive(Clone)]
pub struct ExchangeService {
    rates: Arc<dyn ExchangeRatesProvider>,
}

impl ExchangeService {
    pub fn new(rates: Arc<dyn ExchangeRatesProvider>) -> Self {
        Self { rates }
    }

    /// Validate the order against stored state. Read-only.
    pub async fn prepare<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer_id: i64,
        order: ExchangeOrder,
    ) -> Result<PreparedExchange, AppError> {
        prepare(conn, customer_id, order)
            .await
            .inspect_err(|e| log_command_failure("exchange", e))
    }

    /// Price a prepared exchange. Never touches the database.
    pub async fn quote(&self, prepared: PreparedExchange) -> Result<ExchangeQuote, AppError> {
        self.price(prepared)
            .await
            .inspect_err(|e| log_command_failure("exchange", e))
    }

    /// Move the money and record the event; returns the refreshed customer.
    pub async fn settle<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        quote: ExchangeQuote,
    ) -> Result<CustomerView, AppError> {
        settle(conn, quote)
            .await
            .inspect_err(|e| log_command_failure("exchange", e))
    }

    /// All three steps on a single connection.
    pub async fn exchange<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer_id: i64,
        order: ExchangeOrder,
    ) -> Result<CustomerView, AppError> {
        let prepared = self.prepare(conn, customer_id, order).await?;
        let quote = self.quote(prepared).await?;
        self.settle(conn, quote).await
    }

    async fn price(&self, prepared: PreparedExchange) -> Result<ExchangeQuote, AppError> {
        let ExchangeOrder { from, to, amount } = prepared.order;
        let from_rate = rate_for(self.rates.as_ref(), from).await?;
        let to_rate = rate_for(self.rates.as_ref(), to).await?;
        let credit = convert(amount, from_rate, to_rate)?;

        Ok(ExchangeQuote {
            customer_id: prepared.customer_id,
            from: from_rate,
            to: to_rate,
            debit: amount,
            credit,
        })
    }
}

async fn prepare<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
    order: ExchangeOrder,
) -> Result<PreparedExchange, AppError> {
    if order.from == order.to {
        return Err(AppError::bad_request(
            ErrorCode::InvalidExchange,
            format!("Cannot exchange {} to the same currency", order.from),
        ));
    }
    if !order.amount.is_positive() {
        return Err(AppError::bad_request(
            ErrorCode::InvalidExchange,
            "Exchange amount must be positive",
        ));
    }

    let view = load_view(conn, customer_id).await?;
    let find = |currency: Currency| {
        view.accounts
            .iter()
            .find(|a| a.currency == currency)
            .ok_or_else(|| DomainError::account_not_found(customer_id, currency))
    };
    let source = find(order.from)?;
    find(order.to)?;

    if source.balance < order.amount {
        return Err(not_enough(order.from).into());
    }

    Ok(PreparedExchange { customer_id, order })
}

async fn settle<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    quote: ExchangeQuote,
) -> Result<CustomerView, AppError> {
    let customer_id = quote.customer_id;
    let (from, to) = (quote.from.currency, quote.to.currency);

    accounts::apply_delta(conn, customer_id, from, -quote.debit)
        .await
        .map_err(|e| match e {
            DomainError::InsufficientFunds(_) => not_enough(from),
            other => other,
        })?;
    accounts::apply_delta(conn, customer_id, to, quote.credit).await?;

    outbox::append(
        conn,
        &AccountEvent::CurrencyExchanged {
            customer_id,
            from_currency: from,
            to_currency: to,
            debited: quote.debit.to_decimal(),
            credited: quote.credit.to_decimal(),
        },
    )
    .await?;

    info!(
        customer_id,
        from = %from,
        to = %to,
        debited = %quote.debit,
        credited = %quote.credit,
        "currency exchanged"
    );

    load_view(conn, customer_id).await
}
