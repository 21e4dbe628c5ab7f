//! Pure domain types and arithmetic: no I/O, no framework types.

pub mod currency;
pub mod events;
pub mod exchange;
pub mod money;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_exchange;

pub use currency::Currency;
pub use exchange::ExchangeRate;
pub use money::Money;
