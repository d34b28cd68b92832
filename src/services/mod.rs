//! Domain Services Module
//!
//! Contains the business logic services for the customer backend.

pub mod customer;

pub use customer::{CustomerError, CustomerResult, CustomerService};
