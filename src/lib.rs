//! Customer Backend
//!
//! CRUD over customer records (name, email, age) exposed as a REST API.
//!
//! ## Layers
//!
//! 1. **Storage** - `CustomerStore` trait with SQLite and in-memory implementations
//! 2. **Service** - business rules: unique emails, existence checks, patch updates
//! 3. **API** - axum routes under `/api/v1/customers`
//!
//! Shared configuration, logging and errors live in `common`.

pub mod api;
pub mod common;
pub mod services;
pub mod storage;
pub mod types;

use std::sync::Arc;

// Re-exports: API
pub use api::{create_router, start_server, AppState, ErrorResponse, SharedAppState};

// Re-exports: Service
pub use services::{CustomerError, CustomerResult, CustomerService};

// Re-exports: Storage
pub use storage::{
    CustomerStore, MemoryCustomerStore, SqliteCustomerStore, StorageError, StorageResult,
};

// Re-exports: Types
pub use types::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest, NewCustomer};

// Re-exports: Common
pub use common::{AppConfig, AppError, StoreKind};

/// Open the store selected by `config` and wrap it in a service
pub fn build_service(config: &AppConfig) -> common::Result<CustomerService> {
    let store: Arc<dyn CustomerStore> = match config.store {
        StoreKind::Sqlite => Arc::new(SqliteCustomerStore::new(&config.db_path)?),
        StoreKind::Memory if config.seed => Arc::new(MemoryCustomerStore::seeded()),
        StoreKind::Memory => Arc::new(MemoryCustomerStore::new()),
    };

    Ok(CustomerService::new(store))
}
