use actix_web::test;

use crate::support::{build_test_state, create_test_app};

fn request_id(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn assigns_a_uuid_request_id() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let first = request_id(&resp);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let second = request_id(&resp);

    assert!(uuid::Uuid::parse_str(&first).is_ok());
    assert_ne!(first, second);
}

#[actix_web::test]
async fn honours_incoming_uuid_and_replaces_garbage() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let incoming = "6f1c2d3e-4b5a-4c6d-8e7f-0a1b2c3d4e5f";

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", incoming))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(request_id(&resp), incoming);

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", "<script>"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(request_id(&resp), "<script>");
}
