use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use crate::trace_ctx::UNKNOWN_TRACE_ID;

/// What the router resolved for a request: the route template and, on
/// customer routes, the customer the request is about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub route: Option<String>,
    pub customer_id: Option<i64>,
}

impl RouteContext {
    /// Read after the inner service ran; before routing the match info is empty.
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            route: req.match_pattern(),
            customer_id: req
                .match_info()
                .get("customer_id")
                .and_then(|raw| raw.parse().ok()),
        }
    }
}

struct RequestRecord {
    method: String,
    path: String,
    trace_id: String,
    started: Instant,
}

impl RequestRecord {
    fn emit(&self, status: StatusCode, ctx: &RouteContext) {
        let status_code = status.as_u16();
        let duration_us = self.started.elapsed().as_micros() as u64;
        let route = ctx.route.as_deref().unwrap_or(self.path.as_str());

        macro_rules! completed {
            ($level:ident) => {
                $level!(
                    http.method = %self.method,
                    url.path = %self.path,
                    http.route = %route,
                    http.status_code = status_code,
                    customer_id = ctx.customer_id,
                    duration_us,
                    trace_id = %self.trace_id,
                    "request_completed"
                )
            };
        }

        if status.is_server_error() {
            completed!(error);
        } else if status.is_client_error() {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

/// One `request_completed` record per request; level follows the status class.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let record = RequestRecord {
            method: req.method().to_string(),
            path: req.path().to_string(),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|id| id.0.clone())
                .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string()),
            started: Instant::now(),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            match &result {
                Ok(res) => record.emit(res.status(), &RouteContext::from_request(res.request())),
                Err(err) => record.emit(
                    err.as_response_error().status_code(),
                    &RouteContext::default(),
                ),
            }

            result
        })
    }
}
