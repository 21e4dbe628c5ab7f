//! Domain events recorded in the transactional outbox.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedAccount {
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub is_main_account: bool,
}

/// Events are serialized as camelCase JSON with a `type` tag matching
/// [`AccountEvent::event_type`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum AccountEvent {
    CustomerCreated {
        customer_id: i64,
        first_name: String,
        last_name: String,
        accounts: Vec<OpenedAccount>,
    },
    CurrencyExchanged {
        customer_id: i64,
        from_currency: Currency,
        to_currency: Currency,
        #[serde(with = "rust_decimal::serde::str")]
        debited: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        credited: Decimal,
    },
}

impl AccountEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::CustomerCreated { .. } => "CustomerCreated",
            AccountEvent::CurrencyExchanged { .. } => "CurrencyExchanged",
        }
    }

    /// Customer id the event belongs to; consumers partition on it.
    pub fn aggregate_id(&self) -> i64 {
        match self {
            AccountEvent::CustomerCreated { customer_id, .. }
            | AccountEvent::CurrencyExchanged { customer_id, .. } => *customer_id,
        }
    }
}
