//! SQLite Persistent Storage for Customers
//!
//! Provides durable storage for customer records that survives service restarts.
//! Uses connection pooling via r2d2 for concurrent access.

use async_trait::async_trait;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};
use std::path::Path;

use super::traits::{CustomerStore, StorageError, StorageResult};
use crate::types::customer::{Customer, NewCustomer};

/// SQLite primary key / unique constraint violations
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// SQLite-backed customer store with connection pooling
pub struct SqliteCustomerStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteCustomerStore {
    /// Create a new store with the given database path
    ///
    /// Creates the database file and the customers table if needed.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations()?;

        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations()?;

        Ok(store)
    }

    /// Get a connection from the pool
    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StorageError> {
        self.pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// Create the customers table
    fn run_migrations(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                age INTEGER NOT NULL
            );
            "#,
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    /// Convert a database row to Customer
    fn row_to_customer(row: &rusqlite::Row) -> rusqlite::Result<Customer> {
        Ok(Customer {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            age: row.get("age")?,
        })
    }

    /// Map a write failure, turning unique-index violations into `Duplicate`
    fn write_error(e: rusqlite::Error, email: &str) -> StorageError {
        if let rusqlite::Error::SqliteFailure(ref err, _) = e {
            if err.extended_code == SQLITE_CONSTRAINT_PRIMARYKEY
                || err.extended_code == SQLITE_CONSTRAINT_UNIQUE
            {
                return StorageError::Duplicate(email.to_string());
            }
        }
        StorageError::Database(e.to_string())
    }

    // Synchronous helper methods for the trait implementations

    fn list_all_sync(&self) -> Result<Vec<Customer>, StorageError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare("SELECT id, name, email, age FROM customers ORDER BY id ASC")
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let customers = stmt
            .query_map([], |row| Self::row_to_customer(row))
            .map_err(|e| StorageError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(customers)
    }

    fn get_by_id_sync(&self, id: i64) -> Result<Option<Customer>, StorageError> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT id, name, email, age FROM customers WHERE id = ?1",
            params![id],
            |row| Self::row_to_customer(row),
        )
        .optional()
        .map_err(|e| StorageError::Database(e.to_string()))
    }

    fn insert_sync(&self, customer: &NewCustomer) -> Result<Customer, StorageError> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO customers (name, email, age) VALUES (?1, ?2, ?3)",
            params![customer.name, customer.email, customer.age],
        )
        .map_err(|e| Self::write_error(e, &customer.email))?;

        Ok(customer.clone().with_id(conn.last_insert_rowid()))
    }

    fn delete_by_id_sync(&self, id: i64) -> Result<bool, StorageError> {
        let conn = self.conn()?;

        let rows_affected = conn
            .execute("DELETE FROM customers WHERE id = ?1", params![id])
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(rows_affected > 0)
    }

    fn exists_by_id_sync(&self, id: i64) -> Result<bool, StorageError> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )
        .map_err(|e| StorageError::Database(e.to_string()))
    }

    fn exists_by_email_sync(&self, email: &str) -> Result<bool, StorageError> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?1)",
            params![email],
            |row| row.get(0),
        )
        .map_err(|e| StorageError::Database(e.to_string()))
    }

    fn update_sync(&self, customer: &Customer) -> Result<(), StorageError> {
        let conn = self.conn()?;

        let rows_affected = conn
            .execute(
                "UPDATE customers SET name = ?2, email = ?3, age = ?4 WHERE id = ?1",
                params![customer.id, customer.name, customer.email, customer.age],
            )
            .map_err(|e| Self::write_error(e, &customer.email))?;

        if rows_affected == 0 {
            return Err(StorageError::NotFound(customer.id.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl CustomerStore for SqliteCustomerStore {
    async fn list_all(&self) -> StorageResult<Vec<Customer>> {
        self.list_all_sync()
    }

    async fn get_by_id(&self, id: i64) -> StorageResult<Option<Customer>> {
        self.get_by_id_sync(id)
    }

    async fn insert(&self, customer: &NewCustomer) -> StorageResult<Customer> {
        self.insert_sync(customer)
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        self.delete_by_id_sync(id)
    }

    async fn exists_by_id(&self, id: i64) -> StorageResult<bool> {
        self.exists_by_id_sync(id)
    }

    async fn exists_by_email(&self, email: &str) -> StorageResult<bool> {
        self.exists_by_email_sync(email)
    }

    async fn update(&self, customer: &Customer) -> StorageResult<()> {
        self.update_sync(customer)
    }

    fn kind(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str, email: &str, age: i32) -> NewCustomer {
        NewCustomer::new(name, email, age)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = SqliteCustomerStore::in_memory().unwrap();

        let inserted = store
            .insert(&new_customer("Alex", "alex@test.com", 23))
            .await
            .unwrap();
        assert_eq!(inserted.id, 1);

        let retrieved = store.get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(retrieved, Customer::new(1, "Alex", "alex@test.com", 23));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = SqliteCustomerStore::in_memory().unwrap();
        assert!(store.get_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all() {
        let store = SqliteCustomerStore::in_memory().unwrap();

        store.insert(&new_customer("A", "a@test.com", 1)).await.unwrap();
        store.insert(&new_customer("B", "b@test.com", 2)).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].email, "a@test.com");
        assert_eq!(all[1].email, "b@test.com");
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let store = SqliteCustomerStore::in_memory().unwrap();

        store.insert(&new_customer("A", "same@test.com", 1)).await.unwrap();
        let result = store.insert(&new_customer("B", "same@test.com", 2)).await;

        assert!(matches!(result, Err(StorageError::Duplicate(_))));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_exists_checks() {
        let store = SqliteCustomerStore::in_memory().unwrap();
        let inserted = store.insert(&new_customer("A", "a@test.com", 1)).await.unwrap();

        assert!(store.exists_by_id(inserted.id).await.unwrap());
        assert!(!store.exists_by_id(inserted.id + 1).await.unwrap());
        assert!(store.exists_by_email("a@test.com").await.unwrap());
        assert!(!store.exists_by_email("b@test.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_update() {
        let store = SqliteCustomerStore::in_memory().unwrap();
        let mut customer = store.insert(&new_customer("A", "a@test.com", 1)).await.unwrap();

        customer.name = "Alexandro".to_string();
        customer.age = 40;
        store.update(&customer).await.unwrap();

        let retrieved = store.get_by_id(customer.id).await.unwrap().unwrap();
        assert_eq!(retrieved, customer);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = SqliteCustomerStore::in_memory().unwrap();
        let ghost = Customer::new(9, "Ghost", "ghost@test.com", 1);

        let result = store.update(&ghost).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_and_id_not_reused() {
        let store = SqliteCustomerStore::in_memory().unwrap();

        store.insert(&new_customer("A", "a@test.com", 1)).await.unwrap();
        let second = store.insert(&new_customer("B", "b@test.com", 2)).await.unwrap();

        assert!(store.delete_by_id(second.id).await.unwrap());
        assert!(!store.delete_by_id(second.id).await.unwrap());
        assert!(store.get_by_id(second.id).await.unwrap().is_none());

        let third = store.insert(&new_customer("C", "c@test.com", 3)).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("customers.db");

        {
            let store = SqliteCustomerStore::new(&path).unwrap();
            store.insert(&new_customer("A", "a@test.com", 1)).await.unwrap();
        }

        let reopened = SqliteCustomerStore::new(&path).unwrap();
        let all = reopened.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "A");
    }
}
