//! Common Error Types for the Customer Backend
//!
//! Root error used by the binary; each layer keeps its own error enum.

use thiserror::Error;

use crate::storage::StorageError;

/// Root error type for the customer backend
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Logging errors
    #[error("logging error: {0}")]
    Logging(#[from] super::logging::LoggingError),

    /// Storage errors raised while opening the store
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get error code for logs and API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Logging(_) => "LOGGING_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::ConfigError;

    #[test]
    fn test_error_conversion() {
        let err: AppError =
            ConfigError::InvalidValue("CUSTOMER_STORE".to_string(), "disk".to_string()).into();
        assert!(err.to_string().contains("CUSTOMER_STORE"));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_storage_error_code() {
        let err: AppError = StorageError::Connection("refused".to_string()).into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}
