//! Common Infrastructure Module
//!
//! Shared utilities and configuration for the customer backend.
//!
//! This module contains:
//! - Configuration loading from environment variables
//! - Structured logging setup
//! - Common error types

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::{AppConfig, ConfigError, StoreKind};
pub use error::{AppError, Result};
pub use logging::{
    generate_correlation_id, init_from_config, init_logging, log_api_request, log_api_response,
    log_customer_event, ErrorDetails, EventCategory, LogEvent, LogLevel, LoggingError,
};
