pub mod customer_id;
pub mod validated_json;

pub use customer_id::CustomerId;
pub use validated_json::ValidatedJson;
