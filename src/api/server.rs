//! API Server Module
//!
//! Provides the Axum application builder and server startup logic.
//! Consolidates application state and router configuration.

use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::{request_logging_middleware, security_headers_middleware};
use super::routes::{customers, health};
use crate::common::logging::log_system_event;
use crate::services::CustomerService;

/// Application state shared by all handlers
pub struct AppState {
    pub customers: CustomerService,
}

/// Shared application state type
pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub fn new(customers: CustomerService) -> SharedAppState {
        Arc::new(Self { customers })
    }
}

/// Build the full API router
pub fn create_router(service: CustomerService) -> Router {
    let state = AppState::new(service);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/v1/customers",
            get(customers::handle_list_customers).post(customers::handle_register_customer),
        )
        .route(
            "/api/v1/customers/:id",
            get(customers::handle_get_customer)
                .put(customers::handle_update_customer)
                .delete(customers::handle_delete_customer),
        )
        .route("/health", get(health::handle_health))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the API until Ctrl+C
pub async fn start_server(service: CustomerService, port: u16) -> Result<(), std::io::Error> {
    let store = service.store_kind();
    let app = create_router(service);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, store, "customer API listening");
    println!("=== Customer API ===");
    println!("Listening on http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  GET    /api/v1/customers       - List customers");
    println!("  GET    /api/v1/customers/:id   - Get customer");
    println!("  POST   /api/v1/customers       - Register customer");
    println!("  PUT    /api/v1/customers/:id   - Update customer");
    println!("  DELETE /api/v1/customers/:id   - Delete customer");
    println!("  GET    /health                 - Health check");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log_system_event(
        "server_started",
        Some(serde_json::json!({ "addr": addr.to_string(), "store": store })),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_system_event("server_stopped", None);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    log_system_event("shutdown_signal_received", None);
}
