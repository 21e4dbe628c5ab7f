use bank_service::adapters::currency_accounts_sea::{self, AccountCreate, BalanceDelta};
use bank_service::adapters::customers_sea::{self, CustomerCreate};
use bank_service::db::txn::with_txn;
use bank_service::error::AppError;
use bank_service::errors::ErrorCode;
use sea_orm::DatabaseTransaction;

use crate::support::build_test_state;

async fn customer_with_accounts(txn: &DatabaseTransaction, pln_minor: i64) -> Result<i64, AppError> {
    let customer = customers_sea::create_customer(
        txn,
        CustomerCreate {
            first_name: "Jan".into(),
            last_name: "Kowalski".into(),
        },
    )
    .await?;

    currency_accounts_sea::create_accounts(
        txn,
        vec![
            AccountCreate {
                customer_id: customer.id,
                currency: "PLN".into(),
                balance_minor: pln_minor,
                is_main_account: true,
            },
            AccountCreate {
                customer_id: customer.id,
                currency: "EUR".into(),
                balance_minor: 0,
                is_main_account: false,
            },
        ],
    )
    .await?;

    Ok(customer.id)
}

fn delta(customer_id: i64, currency: &str, delta_minor: i64) -> BalanceDelta {
    BalanceDelta {
        customer_id,
        currency: currency.into(),
        delta_minor,
    }
}

/// Test: find_by_customer lists the main account first
#[tokio::test]
async fn test_find_by_customer_orders_main_first() -> Result<(), AppError> {
    let state = build_test_state().await;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let id = customer_with_accounts(txn, 1_000).await?;

            let accounts = currency_accounts_sea::find_by_customer(txn, id).await?;
            assert_eq!(accounts.len(), 2);
            assert_eq!(accounts[0].currency, "PLN");
            assert!(accounts[0].is_main_account);
            assert_eq!(accounts[1].currency, "EUR");

            let one = currency_accounts_sea::find_one(txn, id, "EUR").await?;
            assert_eq!(one.map(|a| a.balance_minor), Some(0));
            assert!(currency_accounts_sea::find_one(txn, id, "USD").await?.is_none());

            Ok::<_, AppError>(())
        })
    })
    .await
}

/// Test: apply_delta updates only while the balance stays non-negative
#[tokio::test]
async fn test_apply_delta_guard() -> Result<(), AppError> {
    let state = build_test_state().await;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let id = customer_with_accounts(txn, 1_000).await?;

            assert_eq!(currency_accounts_sea::apply_delta(txn, delta(id, "PLN", -400)).await?, 1);
            assert_eq!(currency_accounts_sea::apply_delta(txn, delta(id, "PLN", -600)).await?, 1);
            // exactly zero reached; one more minor unit is refused
            assert_eq!(currency_accounts_sea::apply_delta(txn, delta(id, "PLN", -1)).await?, 0);
            assert_eq!(currency_accounts_sea::apply_delta(txn, delta(id, "EUR", 250)).await?, 1);

            let pln = currency_accounts_sea::find_one(txn, id, "PLN").await?.unwrap();
            let eur = currency_accounts_sea::find_one(txn, id, "EUR").await?.unwrap();
            assert_eq!(pln.balance_minor, 0);
            assert_eq!(eur.balance_minor, 250);
            assert!(eur.updated_at >= eur.created_at);

            Ok::<_, AppError>(())
        })
    })
    .await
}

/// Test: apply_delta on a missing account touches nothing
#[tokio::test]
async fn test_apply_delta_missing_account() -> Result<(), AppError> {
    let state = build_test_state().await;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let id = customer_with_accounts(txn, 1_000).await?;
            assert_eq!(currency_accounts_sea::apply_delta(txn, delta(id, "USD", 5)).await?, 0);
            assert_eq!(currency_accounts_sea::apply_delta(txn, delta(id + 1, "PLN", 5)).await?, 0);
            Ok::<_, AppError>(())
        })
    })
    .await
}

/// Test: a second account in the same currency violates the primary key
#[tokio::test]
async fn test_duplicate_currency_is_unique_violation() {
    let state = build_test_state().await;

    let err = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let id = customer_with_accounts(txn, 0).await?;
            currency_accounts_sea::create_accounts(
                txn,
                vec![AccountCreate {
                    customer_id: id,
                    currency: "EUR".into(),
                    balance_minor: 0,
                    is_main_account: false,
                }],
            )
            .await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::UniqueViolation);
}

/// Test: accounts require an existing customer
#[tokio::test]
async fn test_account_for_unknown_customer_is_rejected() {
    let state = build_test_state().await;

    let err = with_txn(None, &state, |txn| {
        Box::pin(async move {
            currency_accounts_sea::create_accounts(
                txn,
                vec![AccountCreate {
                    customer_id: i64::MAX,
                    currency: "PLN".into(),
                    balance_minor: 0,
                    is_main_account: true,
                }],
            )
            .await?;
            Ok::<_, AppError>(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationError);
}
