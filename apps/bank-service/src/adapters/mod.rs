//! SeaORM adapters. Functions here return `DbErr`; repos map to `DomainError`.

pub mod currency_accounts_sea;
pub mod customers_sea;
pub mod outbox_sea;
