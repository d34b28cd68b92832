//! Storage Layer Module
//!
//! Provides persistence for customer records.
//!
//! This module contains:
//! - Storage trait definition for abstraction
//! - SQLite implementation for production
//! - In-memory implementation for testing

pub mod memory;
pub mod sqlite;
pub mod traits;

// Re-exports for convenience
pub use memory::MemoryCustomerStore;
pub use sqlite::SqliteCustomerStore;
pub use traits::{CustomerStore, StorageError, StorageResult};

#[cfg(test)]
pub use traits::MockCustomerStore;
