pub mod currency_accounts;
pub mod customers;
pub mod outbox_events;

pub use currency_accounts::Entity as CurrencyAccounts;
pub use customers::Entity as Customers;
pub use outbox_events::Entity as OutboxEvents;
