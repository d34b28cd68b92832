//! Structured Logging for the Customer Backend
//!
//! Provides structured logging with:
//! - JSON output for log aggregation services
//! - Correlation IDs for request tracing
//! - Request durations
//!
//! # Usage
//!
//! ```rust,ignore
//! use customer_backend::common::logging::{init_logging, LogLevel};
//!
//! init_logging(LogLevel::Info, true)?; // JSON mode for production
//! ```

use serde::Serialize;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

// ============================================================================
// Log Levels
// ============================================================================

/// Application log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

// ============================================================================
// Structured Event Types
// ============================================================================

/// Event categories for structured logging
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// API request/response events
    Api,
    /// Customer record lifecycle events
    Customer,
    /// System events (startup, shutdown)
    System,
    /// Error events
    Error,
}

/// Structured log event
#[derive(Debug, Serialize)]
pub struct LogEvent {
    /// Event timestamp (ISO 8601)
    pub timestamp: String,
    pub level: String,
    pub category: EventCategory,
    pub message: String,
    /// Correlation ID for request tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

/// Error details for error events
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl LogEvent {
    pub fn new(level: LogLevel, category: EventCategory, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: level.as_filter().to_uppercase(),
            category,
            message: message.into(),
            correlation_id: None,
            data: None,
            duration_ms: None,
            error: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.error = Some(ErrorDetails {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"error\": \"failed to serialize log\", \"message\": \"{}\"}}",
                self.message
            )
        })
    }
}

// ============================================================================
// Event Helpers
// ============================================================================

/// Log an API request
pub fn log_api_request(method: &str, path: &str, correlation_id: &str) {
    let event = LogEvent::new(LogLevel::Info, EventCategory::Api, format!("{} {}", method, path))
        .with_correlation_id(correlation_id)
        .with_data(serde_json::json!({
            "method": method,
            "path": path
        }));

    tracing::info!(target: "customer_backend::api", "{}", event.to_json());
}

/// Log an API response
pub fn log_api_response(
    method: &str,
    path: &str,
    status: u16,
    duration_ms: u64,
    correlation_id: &str,
) {
    let level = if status >= 500 {
        LogLevel::Error
    } else if status >= 400 {
        LogLevel::Warn
    } else {
        LogLevel::Info
    };

    let event = LogEvent::new(level, EventCategory::Api, format!("{} {} -> {}", method, path, status))
        .with_correlation_id(correlation_id)
        .with_duration(duration_ms)
        .with_data(serde_json::json!({
            "method": method,
            "path": path,
            "status": status
        }));

    match level {
        LogLevel::Error => tracing::error!(target: "customer_backend::api", "{}", event.to_json()),
        LogLevel::Warn => tracing::warn!(target: "customer_backend::api", "{}", event.to_json()),
        _ => tracing::info!(target: "customer_backend::api", "{}", event.to_json()),
    }
}

/// Log a customer lifecycle event (registered, updated, deleted, rejected)
pub fn log_customer_event(
    event_type: &str,
    customer_id: Option<i64>,
    success: bool,
    error: Option<(&str, &str)>,
) {
    let level = if success { LogLevel::Info } else { LogLevel::Warn };
    let mut event = LogEvent::new(level, EventCategory::Customer, event_type).with_data(
        serde_json::json!({
            "customer_id": customer_id,
            "success": success
        }),
    );

    if let Some((code, message)) = error {
        event = event.with_error(code, message);
    }

    if success {
        tracing::info!(target: "customer_backend::customer", "{}", event.to_json());
    } else {
        tracing::warn!(target: "customer_backend::customer", "{}", event.to_json());
    }
}

/// Log a system event (startup, shutdown)
pub fn log_system_event(message: &str, data: Option<serde_json::Value>) {
    let mut event = LogEvent::new(LogLevel::Info, EventCategory::System, message);
    if let Some(data) = data {
        event = event.with_data(data);
    }

    tracing::info!(target: "customer_backend::system", "{}", event.to_json());
}

/// Log a failure that is hidden from the API caller
pub fn log_error_event(code: &str, message: &str) {
    let event = LogEvent::new(LogLevel::Error, EventCategory::Error, "request failed")
        .with_error(code, message);

    tracing::error!(target: "customer_backend::error", "{}", event.to_json());
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the logging system
///
/// `RUST_LOG`, when set, takes precedence over `level`.
pub fn init_logging(level: LogLevel, json_format: bool) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_filter();
        EnvFilter::new(format!(
            "customer_backend={},customer_api={},tower_http={},axum={}",
            level, level, level, level
        ))
    });

    if json_format {
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::CLOSE),
        );

        subscriber
            .try_init()
            .map_err(|e| LoggingError::InitFailed(e.to_string()))?;
    } else {
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .pretty()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        );

        subscriber
            .try_init()
            .map_err(|e| LoggingError::InitFailed(e.to_string()))?;
    }

    Ok(())
}

/// Initialize logging from AppConfig
pub fn init_from_config(config: &super::config::AppConfig) -> Result<(), LoggingError> {
    init_logging(LogLevel::from(config.log_level.as_str()), config.log_json)
}

/// Logging errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize logging: {0}")]
    InitFailed(String),
}

/// Generate a unique correlation ID for request tracing
pub fn generate_correlation_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
