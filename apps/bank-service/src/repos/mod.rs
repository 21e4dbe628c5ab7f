//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod accounts;
pub mod customers;
pub mod outbox;
