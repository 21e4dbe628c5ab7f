//! DTOs for currency_accounts_sea adapter.

/// DTO for opening a currency account.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub customer_id: i64,
    pub currency: String,
    pub balance_minor: i64,
    pub is_main_account: bool,
}

/// Signed change applied to one account's balance.
#[derive(Debug, Clone)]
pub struct BalanceDelta {
    pub customer_id: i64,
    pub currency: String,
    pub delta_minor: i64,
}
