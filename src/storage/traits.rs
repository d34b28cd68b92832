//! Storage Trait Definitions
//!
//! Defines the abstract storage interface for customer records.
//! Implementations can use SQLite (production) or in-memory (testing).

use async_trait::async_trait;
use thiserror::Error;

use crate::types::customer::{Customer, NewCustomer};

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Customer storage interface
///
/// Absence is reported as `Ok(None)` / `Ok(false)`, never as an error.
/// Uniqueness of emails is enforced by the service, not here.
///
/// Implementations:
/// - `SqliteCustomerStore` - Production storage with SQLite
/// - `MemoryCustomerStore` - In-memory storage for testing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Get all customers
    async fn list_all(&self) -> StorageResult<Vec<Customer>>;

    /// Get a customer by ID
    async fn get_by_id(&self, id: i64) -> StorageResult<Option<Customer>>;

    /// Insert a new customer, assigning a fresh ID
    async fn insert(&self, customer: &NewCustomer) -> StorageResult<Customer>;

    /// Delete a customer by ID, returning whether a record was removed
    async fn delete_by_id(&self, id: i64) -> StorageResult<bool>;

    /// Check whether a customer with this ID exists
    async fn exists_by_id(&self, id: i64) -> StorageResult<bool>;

    /// Check whether any customer uses this email
    async fn exists_by_email(&self, email: &str) -> StorageResult<bool>;

    /// Replace the stored record that has `customer.id`
    async fn update(&self, customer: &Customer) -> StorageResult<()>;

    /// Short name of the backing engine, reported by the health endpoint
    fn kind(&self) -> &'static str;
}
