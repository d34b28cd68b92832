//! Customer Endpoints
//!
//! - GET    /api/v1/customers     - List all customers
//! - GET    /api/v1/customers/:id - Get one customer
//! - POST   /api/v1/customers     - Register a customer
//! - PUT    /api/v1/customers/:id - Patch a customer
//! - DELETE /api/v1/customers/:id - Delete a customer

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::server::SharedAppState;
use crate::common::logging::log_error_event;
use crate::services::CustomerError;
use crate::types::customer::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};

/// Error body for every failed customer request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl CustomerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::DuplicateEmail(_) => StatusCode::CONFLICT,
            CustomerError::NoChanges | CustomerError::Validation(_) => StatusCode::BAD_REQUEST,
            CustomerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed or mistyped bodies are reported like any other invalid input
impl From<JsonRejection> for CustomerError {
    fn from(rejection: JsonRejection) -> Self {
        CustomerError::Validation(rejection.body_text())
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // storage details stay in the logs
        let error = match &self {
            CustomerError::Storage(e) => {
                log_error_event(self.error_code(), &e.to_string());
                "internal storage error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error,
            code: self.error_code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// GET /api/v1/customers
pub async fn handle_list_customers(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<Customer>>, CustomerError> {
    let customers = state.customers.list_customers().await?;
    Ok(Json(customers))
}

/// GET /api/v1/customers/:id
pub async fn handle_get_customer(
    State(state): State<SharedAppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, CustomerError> {
    let customer = state.customers.get_customer(id).await?;
    Ok(Json(customer))
}

/// POST /api/v1/customers
///
/// Responds 200 with the stored customer, including its assigned id.
pub async fn handle_register_customer(
    State(state): State<SharedAppState>,
    payload: Result<Json<CustomerRegistrationRequest>, JsonRejection>,
) -> Result<Json<Customer>, CustomerError> {
    let Json(req) = payload?;
    let customer = state.customers.register_customer(req).await?;
    Ok(Json(customer))
}

/// PUT /api/v1/customers/:id
pub async fn handle_update_customer(
    State(state): State<SharedAppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CustomerUpdateRequest>, JsonRejection>,
) -> Result<Json<Customer>, CustomerError> {
    let Json(req) = payload?;
    let customer = state.customers.update_customer(id, req).await?;
    Ok(Json(customer))
}

/// DELETE /api/v1/customers/:id
pub async fn handle_delete_customer(
    State(state): State<SharedAppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, CustomerError> {
    state.customers.delete_customer(id).await?;
    Ok(StatusCode::OK)
}
