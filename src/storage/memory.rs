//! In-Memory Storage Implementation
//!
//! Provides in-memory customer storage for testing and development.
//! Data is lost when the service restarts.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{CustomerStore, StorageError, StorageResult};
use crate::types::customer::{Customer, NewCustomer};

/// Records plus the next ID to hand out
#[derive(Debug)]
struct MemoryState {
    /// Records indexed by customer ID
    records: BTreeMap<i64, Customer>,
    /// Next ID; only ever grows so deleted IDs are never reused
    next_id: i64,
}

/// In-memory customer store
///
/// Thread-safe storage for customer records.
/// Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct MemoryCustomerStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryCustomerStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                records: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a store holding the two demo customers
    pub fn seeded() -> Self {
        let mut records = BTreeMap::new();
        records.insert(1, Customer::new(1, "Alex", "alex@gmail.com", 23));
        records.insert(2, Customer::new(2, "Ally", "ally@gmail.com", 21));

        Self {
            state: Arc::new(RwLock::new(MemoryState {
                records,
                next_id: 3,
            })),
        }
    }
}

impl Default for MemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn list_all(&self) -> StorageResult<Vec<Customer>> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> StorageResult<Option<Customer>> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn insert(&self, customer: &NewCustomer) -> StorageResult<Customer> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let record = customer.clone().with_id(id);
        state.records.insert(id, record.clone());

        Ok(record)
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.records.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: i64) -> StorageResult<bool> {
        let state = self.state.read().await;
        Ok(state.records.contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> StorageResult<bool> {
        let state = self.state.read().await;
        Ok(state.records.values().any(|c| c.email == email))
    }

    async fn update(&self, customer: &Customer) -> StorageResult<()> {
        let mut state = self.state.write().await;

        match state.records.get_mut(&customer.id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound(customer.id.to_string())),
        }
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str, email: &str) -> NewCustomer {
        NewCustomer::new(name, email, 30)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryCustomerStore::new();

        let inserted = store
            .insert(&new_customer("Alex", "alex@test.com"))
            .await
            .unwrap();
        assert_eq!(inserted.id, 1);

        let retrieved = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(retrieved, inserted);
        assert!(store.get_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryCustomerStore::new();

        let first = store.insert(&new_customer("A", "a@test.com")).await.unwrap();
        let second = store.insert(&new_customer("B", "b@test.com")).await.unwrap();
        assert!(store.delete_by_id(second.id).await.unwrap());

        let third = store.insert(&new_customer("C", "c@test.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_delete_matches_id_not_position() {
        let store = MemoryCustomerStore::seeded();

        // id 1 sits at position 0; removing by position would drop Ally instead
        assert!(store.delete_by_id(1).await.unwrap());

        let remaining = store.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Ally");

        assert!(!store.delete_by_id(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_checks() {
        let store = MemoryCustomerStore::seeded();

        assert!(store.exists_by_id(2).await.unwrap());
        assert!(!store.exists_by_id(99).await.unwrap());
        assert!(store.exists_by_email("ally@gmail.com").await.unwrap());
        assert!(!store.exists_by_email("nobody@gmail.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let store = MemoryCustomerStore::seeded();

        let mut alex = store.get_by_id(1).await.unwrap().unwrap();
        alex.name = "Alexandro".to_string();
        store.update(&alex).await.unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 2);
        let retrieved = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Alexandro");
        assert_eq!(retrieved.email, "alex@gmail.com");
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryCustomerStore::new();
        let ghost = Customer::new(42, "Ghost", "ghost@test.com", 99);

        let result = store.update(&ghost).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryCustomerStore::new();
        let other = store.clone();

        store.insert(&new_customer("A", "a@test.com")).await.unwrap();
        assert_eq!(other.list_all().await.unwrap().len(), 1);
    }
}
