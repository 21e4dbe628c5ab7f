//! Centralized error codes used in HTTP responses.
//!
//! Every error surfaced to clients carries one of these codes. The string
//! form is SCREAMING_SNAKE_CASE and is part of the public API contract.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// One or more request fields failed validation
    ValidationError,
    /// Malformed request body or parameters
    BadRequest,
    /// Customer id path segment is not a positive integer
    InvalidCustomerId,
    /// Exchange request is structurally valid but not executable (e.g. same currency)
    InvalidExchange,

    // Resource Not Found
    CustomerNotFound,
    CurrencyAccountNotFound,
    NotFound,

    // Business Rules
    /// Debit would take the account below zero
    InsufficientFunds,
    Conflict,
    UniqueViolation,

    // Upstream
    /// Exchange rates could not be fetched
    ExchangeRatesUnavailable,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidCustomerId => "INVALID_CUSTOMER_ID",
            Self::InvalidExchange => "INVALID_EXCHANGE",

            // Resource Not Found
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::CurrencyAccountNotFound => "CURRENCY_ACCOUNT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Rules
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::Conflict => "CONFLICT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",

            // Upstream
            Self::ExchangeRatesUnavailable => "EXCHANGE_RATES_UNAVAILABLE",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
