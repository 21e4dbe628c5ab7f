//! Backend test support utilities
//!
//! Shared by the service's unit and integration tests: logging initialization
//! and Problem Details assertions that do not depend on service types.

pub mod logging;
pub mod problem_details;
