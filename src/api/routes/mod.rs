//! API Routes Module
//!
//! Route handlers organized by domain:
//! - customers: customer CRUD endpoints
//! - health: health check

pub mod customers;
pub mod health;

pub use customers::ErrorResponse;
