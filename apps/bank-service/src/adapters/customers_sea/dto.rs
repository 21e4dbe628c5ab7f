//! DTOs for customers_sea adapter.

/// DTO for creating a new customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub first_name: String,
    pub last_name: String,
}

impl CustomerCreate {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
