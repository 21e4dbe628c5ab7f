use actix_web::http::StatusCode;
use actix_web::test;
use bank_service::state::app_state::AppState;

use crate::support::{build_test_state, create_test_app, StubRates};

#[actix_web::test]
async fn reports_db_and_latest_migration() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20250301_000002_outbox");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
    assert!(body["time"].as_str().is_some());
}

#[actix_web::test]
async fn stays_up_without_database() {
    let state = AppState::without_db(StubRates::sample());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
    assert!(body["db_error"].as_str().unwrap().contains("DB unavailable"));
}

#[actix_web::test]
async fn routes_without_database_are_503() {
    let state = AppState::without_db(StubRates::sample());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/customers/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
