//! Customer Types
//!
//! The customer record plus the request payloads that create and patch it:
//! registration (name, email, age) → stored customer (id assigned) → patched in place

use serde::{Deserialize, Serialize};

/// A stored customer record
///
/// `id` is assigned by the storage layer on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl Customer {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

/// A customer that has not been persisted yet (no id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Attach a storage-assigned id
    pub fn with_id(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Request body for POST /api/v1/customers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<CustomerRegistrationRequest> for NewCustomer {
    fn from(req: CustomerRegistrationRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            age: req.age,
        }
    }
}

/// Request body for PUT /api/v1/customers/:id
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl CustomerUpdateRequest {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn age(age: i32) -> Self {
        Self {
            age: Some(age),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_json_shape() {
        let customer = Customer::new(1, "Alex", "alex@test.com", 23);
        let json = serde_json::to_value(&customer).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Alex", "email": "alex@test.com", "age": 23})
        );
    }

    #[test]
    fn test_update_request_missing_fields() {
        let req: CustomerUpdateRequest = serde_json::from_str(r#"{"name": "Alexandro"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Alexandro"));
        assert!(req.email.is_none());
        assert!(req.age.is_none());

        let req: CustomerUpdateRequest =
            serde_json::from_str(r#"{"name": null, "email": null, "age": null}"#).unwrap();
        assert!(req.name.is_none() && req.email.is_none() && req.age.is_none());
    }

    #[test]
    fn test_registration_into_new_customer() {
        let req = CustomerRegistrationRequest {
            name: "Ally".to_string(),
            email: "ally@gmail.com".to_string(),
            age: 21,
        };

        let customer = NewCustomer::from(req).with_id(7);
        assert_eq!(customer, Customer::new(7, "Ally", "ally@gmail.com", 21));
    }
}
