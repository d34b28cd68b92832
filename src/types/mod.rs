//! Shared Types Module
//!
//! Data types shared across the customer backend.

pub mod customer;

// Re-exports for convenience
pub use customer::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest, NewCustomer};
