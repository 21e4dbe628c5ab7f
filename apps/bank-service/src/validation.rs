//! Field-level request validation.
//!
//! Violations are collected per JSON field name and rendered as the
//! `errors` map of a "Validation Failed" Problem Details response.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;

use crate::domain::money::SCALE;
use crate::domain::Money;
use crate::error::AppError;

/// Name of the rule a field broke; rendered verbatim in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    NotBlank,
    NotNull,
    DecimalMin,
    Digits,
    Positive,
}

impl Constraint {
    pub fn as_str(self) -> &'static str {
        match self {
            Constraint::NotBlank => "NotBlank",
            Constraint::NotNull => "NotNull",
            Constraint::DecimalMin => "DecimalMin",
            Constraint::Digits => "Digits",
            Constraint::Positive => "Positive",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one field.
pub type FieldResult<T> = Result<T, Constraint>;

/// Present and not only whitespace. The value is returned unchanged.
pub fn not_blank(value: Option<String>) -> FieldResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Constraint::NotBlank),
    }
}

pub fn not_null<T>(value: Option<T>) -> FieldResult<T> {
    value.ok_or(Constraint::NotNull)
}

/// Zero or more.
pub fn decimal_min_zero(value: Decimal) -> FieldResult<Decimal> {
    if value < Decimal::ZERO {
        Err(Constraint::DecimalMin)
    } else {
        Ok(value)
    }
}

pub fn positive(value: Decimal) -> FieldResult<Decimal> {
    if value <= Decimal::ZERO {
        Err(Constraint::Positive)
    } else {
        Ok(value)
    }
}

/// At most two fraction digits once trailing zeros are dropped.
pub fn digits(value: Decimal) -> FieldResult<Decimal> {
    if value.normalize().scale() > SCALE {
        Err(Constraint::Digits)
    } else {
        Ok(value)
    }
}

/// Amounts that do not fit minor units are reported as `Digits`.
pub fn money(value: Decimal) -> FieldResult<Money> {
    Money::from_decimal(value).map_err(|_| Constraint::Digits)
}

/// Accumulates violations; only the first one per field is kept.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, constraint: Constraint) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| constraint.to_string());
    }

    /// Record the violation carried by `result`, if any.
    pub fn check<T>(&mut self, field: &str, result: &FieldResult<T>) -> &mut Self {
        if let Err(constraint) = result {
            self.add(field, *constraint);
        }
        self
    }

    pub fn into_error(self) -> AppError {
        AppError::invalid_fields(self.errors)
    }
}
