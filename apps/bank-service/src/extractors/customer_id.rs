use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Customer ID taken from the `{customer_id}` path segment.
///
/// Only the format is checked here; existence is the service's concern so
/// that a missing customer reports `CUSTOMER_NOT_FOUND`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CustomerId(pub i64);

impl CustomerId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let id = raw.parse::<i64>().map_err(|_| {
            AppError::bad_request(
                ErrorCode::InvalidCustomerId,
                format!("Invalid customer id: {raw}"),
            )
        })?;

        if id <= 0 {
            return Err(AppError::bad_request(
                ErrorCode::InvalidCustomerId,
                format!("Customer id must be positive, got: {id}"),
            ));
        }

        Ok(CustomerId(id))
    }
}

impl FromRequest for CustomerId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("customer_id") {
            Some(raw) => CustomerId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidCustomerId,
                "Missing customer_id parameter",
            )),
        };
        ready(result)
    }
}
