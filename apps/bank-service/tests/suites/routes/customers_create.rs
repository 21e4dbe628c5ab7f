use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::{
    assert_field_errors, assert_problem_details_from_service_response,
};
use bank_service::db::require_db;
use bank_service::domain::Currency;
use bank_service::repos::outbox;
use bank_service::routes::customers::CustomerDto;
use rust_decimal::Decimal;
use serde_json::json;

use crate::support::{build_test_state, create_test_app};

fn currencies(dto: &CustomerDto) -> Vec<Currency> {
    dto.account_balance.iter().map(|a| a.currency).collect()
}

#[actix_web::test]
async fn creates_customer_with_default_main_currency() {
    let state = build_test_state().await;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "firstName": "Anna",
            "lastName": "Nowak",
            "mainAccountBalance": 250.75,
            "additionalCurrencies": []
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let dto: CustomerDto = test::read_body_json(resp).await;
    assert_eq!(dto.first_name, "Anna");
    assert_eq!(currencies(&dto), [Currency::Pln, Currency::Usd, Currency::Eur]);
    assert!(dto.account_balance[0].is_main_account);
    assert_eq!(dto.account_balance[0].amount, Decimal::new(25_075, 2));

    // Same transaction wrote the outbox row
    let events = outbox::find_for_aggregate(require_db(&state).unwrap(), dto.account_id)
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "CustomerCreated");
}

#[actix_web::test]
async fn additional_currencies_are_deduplicated_and_exclude_main() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "firstName": "Anna",
            "lastName": "Nowak",
            "mainAccountBalance": "10.00",
            "mainAccountCurrency": "USD",
            "additionalCurrencies": ["EUR", "USD", "EUR"]
        }))
        .to_request();
    let dto: CustomerDto = test::call_and_read_body_json(&app, req).await;

    assert_eq!(currencies(&dto), [Currency::Usd, Currency::Eur]);
    assert!(!dto.account_balance[1].is_main_account);
}

#[actix_web::test]
async fn created_customer_can_be_fetched() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "firstName": "Anna",
            "lastName": "Nowak",
            "mainAccountBalance": 1,
            "mainAccountCurrency": "EUR",
            "additionalCurrencies": ["PLN"]
        }))
        .to_request();
    let created: CustomerDto = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/customers/{}", created.account_id))
        .to_request();
    let fetched: CustomerDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn missing_fields_are_reported_per_field() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({"firstName": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    assert_field_errors(
        &problem,
        &[
            ("additionalCurrencies", "NotNull"),
            ("firstName", "NotBlank"),
            ("lastName", "NotBlank"),
            ("mainAccountBalance", "NotNull"),
        ],
    );
}

#[actix_web::test]
async fn balance_rules_are_decimal_min_and_digits() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    for (balance, constraint) in [(json!(-1), "DecimalMin"), (json!("1.999"), "Digits")] {
        let req = test::TestRequest::post()
            .uri("/customers")
            .set_json(json!({
                "firstName": "Anna",
                "lastName": "Nowak",
                "mainAccountBalance": balance,
                "additionalCurrencies": []
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let problem = assert_problem_details_from_service_response(
            resp,
            "VALIDATION_ERROR",
            StatusCode::BAD_REQUEST,
            None,
        )
        .await;
        assert_field_errors(&problem, &[("mainAccountBalance", constraint)]);
    }
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/customers")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"firstName\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
}

#[actix_web::test]
async fn unsupported_currency_is_bad_request() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "firstName": "Anna",
            "lastName": "Nowak",
            "mainAccountBalance": 1,
            "mainAccountCurrency": "GBP",
            "additionalCurrencies": []
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("wrong types"),
    )
    .await;
}

#[actix_web::test]
async fn names_are_stored_as_sent() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/customers")
        .set_json(json!({
            "firstName": " Anna",
            "lastName": "Nowak  ",
            "mainAccountBalance": 1,
            "additionalCurrencies": []
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: CustomerDto = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri(&format!("/customers/{}", created.account_id))
        .to_request();
    let fetched: CustomerDto = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.first_name, " Anna");
    assert_eq!(fetched.last_name, "Nowak  ");
}
