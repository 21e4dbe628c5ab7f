//! NBP client against a local stub of the rates API.

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use bank_service::config::exchange_rates::ExchangeRatesConfig;
use bank_service::domain::{Currency, ExchangeRate};
use bank_service::errors::domain::DomainError;
use bank_service::services::exchange_rates::{ExchangeRatesProvider, NbpExchangeRatesClient};
use rust_decimal::Decimal;
use serde_json::json;

async fn rates(path: web::Path<(String, String)>) -> HttpResponse {
    let (table, code) = path.into_inner();
    if table != "A" {
        return HttpResponse::NotFound().finish();
    }
    match code.as_str() {
        "EUR" => HttpResponse::Ok().json(json!({
            "table": "A",
            "currency": "euro",
            "code": "EUR",
            "rates": [{"no": "001/A/NBP/2025", "effectiveDate": "2025-01-02", "mid": 4.2737}]
        })),
        // published but empty
        "USD" => HttpResponse::Ok().json(json!({"table": "A", "code": "USD", "rates": []})),
        _ => HttpResponse::NotFound().body("404 NotFound"),
    }
}

/// Serve the stub on an ephemeral port and return its base url.
fn start_stub() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
    let port = listener.local_addr().expect("addr").port();
    let server = HttpServer::new(|| {
        App::new().route(
            "/api/exchangerates/rates/{table}/{code}/",
            web::get().to(rates),
        )
    })
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();
    actix_web::rt::spawn(server);
    format!("http://127.0.0.1:{port}")
}

fn client(base_url: &str) -> NbpExchangeRatesClient {
    let config = ExchangeRatesConfig {
        timeout: Duration::from_secs(2),
        ..ExchangeRatesConfig::default()
    }
    .with_base_url(base_url);
    NbpExchangeRatesClient::new(config).unwrap()
}

#[actix_web::test]
async fn reads_mid_rate_from_table_a() {
    let base = start_stub();
    let rate = client(&base).fetch_current_rate(Currency::Eur).await.unwrap();
    assert_eq!(rate, ExchangeRate::new(Currency::Eur, Decimal::new(42_737, 4)));
}

#[actix_web::test]
async fn empty_rates_list_is_upstream_error() {
    let base = start_stub();
    let err = client(&base)
        .fetch_current_rate(Currency::Usd)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Upstream(ref detail)
        if detail == "Error fetching exchange rate for USD"));
}

#[actix_web::test]
async fn error_status_is_upstream_error() {
    let base = start_stub();
    let mut config = ExchangeRatesConfig::default().with_base_url(base);
    config.table = "B".to_string();
    let err = NbpExchangeRatesClient::new(config)
        .unwrap()
        .fetch_current_rate(Currency::Eur)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));
}

#[actix_web::test]
async fn unreachable_service_is_upstream_error() {
    // port 9 (discard) is closed on loopback
    let err = client("http://127.0.0.1:9")
        .fetch_current_rate(Currency::Eur)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Upstream(_)));
}
