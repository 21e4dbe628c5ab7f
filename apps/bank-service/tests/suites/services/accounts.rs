use bank_service::db::require_db;
use bank_service::domain::{Currency, Money};
use bank_service::errors::ErrorCode;
use bank_service::services::accounts::{AccountService, NewAccountsRequest};

use crate::support::build_test_state;
use crate::support::factory::{money, seed_customer};

#[tokio::test]
async fn find_accounts_for_unknown_customer_is_empty() {
    let state = build_test_state().await;
    let conn = require_db(&state).unwrap();

    let accounts = AccountService::new().find_accounts_for(conn, 404).await.unwrap();
    assert!(accounts.is_empty());
}

#[tokio::test]
async fn update_amount_by_applies_positive_and_negative_deltas() {
    let state = build_test_state().await;
    let seeded = seed_customer(&state, Currency::Pln, "10").await;
    let conn = require_db(&state).unwrap();
    let service = AccountService::new();
    let id = seeded.customer.id;

    let credited = service
        .update_amount_by(conn, id, Currency::Usd, money("2.50"))
        .await
        .unwrap();
    assert_eq!(credited.balance, money("2.50"));

    let debited = service
        .update_amount_by(conn, id, Currency::Pln, -money("10"))
        .await
        .unwrap();
    assert_eq!(debited.balance, Money::ZERO);
}

#[tokio::test]
async fn update_amount_by_refuses_to_go_negative() {
    let state = build_test_state().await;
    let seeded = seed_customer(&state, Currency::Pln, "1").await;
    let conn = require_db(&state).unwrap();
    let service = AccountService::new();

    let err = service
        .update_amount_by(conn, seeded.customer.id, Currency::Pln, -money("1.01"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientFunds);

    let accounts = service.find_accounts_for(conn, seeded.customer.id).await.unwrap();
    assert_eq!(accounts[0].balance, money("1"));
}

#[tokio::test]
async fn update_amount_by_unknown_account_is_not_found() {
    let state = build_test_state().await;
    let seeded = seed_customer(&state, Currency::Pln, "1").await;
    let conn = require_db(&state).unwrap();

    let err = AccountService::new()
        .update_amount_by(conn, seeded.customer.id + 1, Currency::Pln, money("1"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CurrencyAccountNotFound);
}

#[tokio::test]
async fn duplicate_currency_account_is_a_conflict() {
    let state = build_test_state().await;
    let seeded = seed_customer(&state, Currency::Pln, "1").await;
    let conn = require_db(&state).unwrap();

    let err = AccountService::new()
        .create_new_accounts(
            conn,
            NewAccountsRequest {
                customer_id: seeded.customer.id,
                main_currency: Currency::Eur,
                main_balance: Money::ZERO,
                additional_currencies: vec![],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UniqueViolation);
    assert_eq!(err.status().as_u16(), 409);
}

#[tokio::test]
async fn negative_main_balance_is_a_validation_error() {
    let state = build_test_state().await;
    let seeded = seed_customer(&state, Currency::Pln, "1").await;
    let conn = require_db(&state).unwrap();

    let err = AccountService::new()
        .create_new_accounts(
            conn,
            NewAccountsRequest {
                customer_id: seeded.customer.id,
                main_currency: Currency::Pln,
                main_balance: -money("0.01"),
                additional_currencies: vec![],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_eq!(err.status().as_u16(), 400);
}
