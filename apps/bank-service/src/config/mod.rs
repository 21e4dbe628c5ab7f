//! Environment-driven configuration.
//!
//! All settings are read once at startup. Optional settings fall back to
//! documented defaults; required ones fail with `AppError::Config`.

pub mod db;
pub mod exchange_rates;
pub mod outbox;
pub mod server;

use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Parse an optional environment variable, falling back to `default` when unset.
pub(crate) fn var_or<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| {
            AppError::config(format!("Environment variable '{name}' is invalid: {e}"))
        }),
        Err(_) => Ok(default),
    }
}
