use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use bank_service::config::db::DbKind;
use bank_service::config::exchange_rates::ExchangeRatesConfig;
use bank_service::config::outbox::OutboxConfig;
use bank_service::config::server::ServerConfig;
use bank_service::infra::state::build_state;
use bank_service::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use bank_service::routes;
use bank_service::services::outbox_relay::{LogPublisher, OutboxRelay};
use bank_service::telemetry;
use tokio::sync::watch;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or sourced manually for local runs).
    let configs = ServerConfig::from_env().and_then(|server| {
        Ok((
            server,
            ExchangeRatesConfig::from_env()?,
            OutboxConfig::from_env()?,
        ))
    });
    let (server, rates_config, outbox_config) = match configs {
        Ok(configs) => configs,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // Migrations run here, before the server accepts traffic.
    let app_state = match build_state()
        .with_db(DbKind::Postgres)
        .with_exchange_rates_config(rates_config)
        .with_outbox_config(outbox_config.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!("database connected");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let relay = OutboxRelay::new(
        app_state.clone(),
        Arc::new(LogPublisher::default()),
        outbox_config,
    );
    let relay_handle = actix_web::rt::spawn(relay.run(shutdown_rx));

    let data = web::Data::new(app_state);

    info!(host = %server.host, port = server.port, "starting bank-service");

    let result = HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = relay_handle.await {
        error!(error = %e, "outbox relay task failed");
    }

    result
}
