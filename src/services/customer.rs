//! Customer Service
//!
//! Business rules on top of a `CustomerStore`:
//! - emails are unique across all customers
//! - get / delete / update require the customer to exist
//! - updates are patches; a patch that changes nothing is rejected

use std::sync::Arc;
use tracing::debug;

use crate::common::logging::log_customer_event;
use crate::storage::{CustomerStore, StorageError};
use crate::types::customer::{
    Customer, CustomerRegistrationRequest, CustomerUpdateRequest, NewCustomer,
};

/// Customer service errors
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("customer with id {0} is not found")]
    NotFound(i64),

    #[error("email already taken: {0}")]
    DuplicateEmail(String),

    #[error("no data changes found")]
    NoChanges,

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CustomerError {
    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CustomerError::NotFound(_) => "NOT_FOUND",
            CustomerError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            CustomerError::NoChanges => "NO_CHANGES",
            CustomerError::Validation(_) => "VALIDATION_ERROR",
            CustomerError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Storage-level duplicates can only come from the email unique index
    fn from_write(err: StorageError, email: &str) -> Self {
        match err {
            StorageError::Duplicate(_) => CustomerError::DuplicateEmail(email.to_string()),
            other => CustomerError::Storage(other),
        }
    }
}

pub type CustomerResult<T> = Result<T, CustomerError>;

fn validate_name(name: &str) -> CustomerResult<()> {
    if name.trim().is_empty() {
        return Err(CustomerError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> CustomerResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(CustomerError::Validation(format!("invalid email: {}", email)));
    }
    Ok(())
}

/// Customer service over any storage backend
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Name of the storage engine in use
    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    /// All customers, exactly as storage returns them
    pub async fn list_customers(&self) -> CustomerResult<Vec<Customer>> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get_customer(&self, id: i64) -> CustomerResult<Customer> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Register a new customer; the email must not be in use
    pub async fn register_customer(
        &self,
        request: CustomerRegistrationRequest,
    ) -> CustomerResult<Customer> {
        validate_name(&request.name)?;
        validate_email(&request.email)?;

        if self.store.exists_by_email(&request.email).await? {
            log_customer_event(
                "customer_rejected",
                None,
                false,
                Some(("DUPLICATE_EMAIL", request.email.as_str())),
            );
            return Err(CustomerError::DuplicateEmail(request.email));
        }

        let new_customer = NewCustomer::from(request);
        let customer = self
            .store
            .insert(&new_customer)
            .await
            .map_err(|e| CustomerError::from_write(e, &new_customer.email))?;

        log_customer_event("customer_registered", Some(customer.id), true, None);
        Ok(customer)
    }

    pub async fn delete_customer(&self, id: i64) -> CustomerResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        self.store.delete_by_id(id).await?;

        log_customer_event("customer_deleted", Some(id), true, None);
        Ok(())
    }

    /// Apply a patch to an existing customer
    ///
    /// Only fields that are present and differ from the stored value count as
    /// changes. The new email is checked for uniqueness only when it differs.
    pub async fn update_customer(
        &self,
        id: i64,
        patch: CustomerUpdateRequest,
    ) -> CustomerResult<Customer> {
        let mut customer = self.get_customer(id).await?;
        let mut changes = false;

        if let Some(name) = patch.name {
            if name != customer.name {
                validate_name(&name)?;
                customer.name = name;
                changes = true;
            }
        }

        if let Some(email) = patch.email {
            if email != customer.email {
                validate_email(&email)?;
                if self.store.exists_by_email(&email).await? {
                    log_customer_event(
                        "customer_rejected",
                        Some(id),
                        false,
                        Some(("DUPLICATE_EMAIL", email.as_str())),
                    );
                    return Err(CustomerError::DuplicateEmail(email));
                }
                customer.email = email;
                changes = true;
            }
        }

        if let Some(age) = patch.age {
            if age != customer.age {
                customer.age = age;
                changes = true;
            }
        }

        if !changes {
            debug!(customer_id = id, "update rejected: patch matches stored record");
            return Err(CustomerError::NoChanges);
        }

        self.store
            .update(&customer)
            .await
            .map_err(|e| CustomerError::from_write(e, &customer.email))?;

        log_customer_event("customer_updated", Some(id), true, None);
        Ok(customer)
    }
}
