//! Health check endpoint

use axum::{extract::State, response::IntoResponse, Json};

use crate::api::server::SharedAppState;

/// GET /health
pub async fn handle_health(State(state): State<SharedAppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "customer-api",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.customers.store_kind()
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::server::create_router;
    use crate::services::CustomerService;
    use crate::storage::SqliteCustomerStore;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let store = SqliteCustomerStore::in_memory().unwrap();
        let app = create_router(CustomerService::new(Arc::new(store)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["store"], "sqlite");
    }
}
