use actix_web::http::{header, StatusCode};
use actix_web::{test, web, HttpResponse};
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use bank_service::errors::ErrorCode;
use bank_service::AppError;

use crate::support::{build_test_state, create_test_app};

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Resource not found"))
}

async fn conflict() -> Result<HttpResponse, AppError> {
    Err(AppError::conflict(ErrorCode::UniqueViolation, "Duplicate"))
}

async fn db_unavailable() -> Result<HttpResponse, AppError> {
    Err(AppError::db_unavailable())
}

async fn internal() -> Result<HttpResponse, AppError> {
    Err(AppError::internal(ErrorCode::Internal, "boom"))
}

// handler-only: validates error shape through the middleware stack
#[actix_web::test]
async fn all_errors_render_problem_details() {
    let state = build_test_state().await;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/_test/not_found", web::get().to(not_found))
                .route("/_test/conflict", web::get().to(conflict))
                .route("/_test/db_unavailable", web::get().to(db_unavailable))
                .route("/_test/internal", web::get().to(internal));
        })
        .build()
        .await;

    let cases = [
        ("/_test/not_found", "NOT_FOUND", StatusCode::NOT_FOUND, "Not Found"),
        ("/_test/conflict", "UNIQUE_VIOLATION", StatusCode::CONFLICT, "Conflict"),
        (
            "/_test/db_unavailable",
            "DB_UNAVAILABLE",
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable",
        ),
        (
            "/_test/internal",
            "INTERNAL",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        ),
    ];

    for (uri, code, status, title) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let problem = assert_problem_details_from_service_response(resp, code, status, None).await;
        assert_eq!(problem.title, title, "uri {uri}");
        assert!(problem.type_.ends_with(code), "type {}", problem.type_);
        assert!(problem.errors.is_none());
    }
}

#[actix_web::test]
async fn service_unavailable_carries_retry_after() {
    let state = build_test_state().await;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/_test/db_unavailable", web::get().to(db_unavailable));
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/_test/db_unavailable").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "1");
}

#[actix_web::test]
async fn error_trace_id_matches_request_id_header() {
    let state = build_test_state().await;
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/_test/not_found", web::get().to(not_found));
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/_test/not_found").to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id")
        .to_str()
        .unwrap()
        .to_string();

    let problem =
        assert_problem_details_from_service_response(resp, "NOT_FOUND", StatusCode::NOT_FOUND, None)
            .await;
    assert_eq!(problem.trace_id, request_id);
}
