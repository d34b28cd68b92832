//! Environment-based Configuration for the Customer Backend
//!
//! Configuration is read from environment variables (a `.env` file in the
//! working directory is loaded first, if present). CLI flags in the binary
//! override whatever is resolved here.
//!
//! # Environment Variables
//!
//! - `CUSTOMER_API_PORT` - REST API port (default: 8080)
//! - `CUSTOMER_STORE` - "sqlite" or "memory" (default: "sqlite")
//! - `CUSTOMER_DB_PATH` - SQLite database file (default: "data/customers.db")
//! - `CUSTOMER_SEED` - Set to "1" to seed the memory store with demo customers
//! - `CUSTOMER_LOG_LEVEL` - Logging level (trace, debug, info, warn, error)
//! - `CUSTOMER_LOG_JSON` - Set to "1" for JSON log output

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "data/customers.db";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Which storage engine backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Durable SQLite database
    Sqlite,
    /// Process-local store, lost on restart
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "db" => Ok(StoreKind::Sqlite),
            "memory" | "mem" | "list" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::InvalidValue(
                "CUSTOMER_STORE".to_string(),
                format!("unknown store: {} (use 'sqlite' or 'memory')", s),
            )),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Sqlite => write!(f, "sqlite"),
            StoreKind::Memory => write!(f, "memory"),
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// REST API port
    pub port: u16,

    /// Storage engine
    pub store: StoreKind,

    /// SQLite database path (ignored for the memory store)
    pub db_path: PathBuf,

    /// Seed the memory store with demo customers
    pub seed: bool,

    /// Log level
    pub log_level: String,

    /// Emit JSON logs
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_API_PORT,
            store: StoreKind::Sqlite,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            seed: false,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("CUSTOMER_API_PORT") {
            Some(value) => value.parse().map_err(|_| {
                ConfigError::InvalidValue(
                    "CUSTOMER_API_PORT".to_string(),
                    format!("not a port number: {}", value),
                )
            })?,
            None => defaults.port,
        };

        let store = match lookup("CUSTOMER_STORE") {
            Some(value) => value.parse()?,
            None => defaults.store,
        };

        let db_path = lookup("CUSTOMER_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let seed = lookup("CUSTOMER_SEED").map(|v| v == "1").unwrap_or(false);
        let log_level = lookup("CUSTOMER_LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_json = lookup("CUSTOMER_LOG_JSON").map(|v| v == "1").unwrap_or(false);

        Ok(Self {
            port,
            store,
            db_path,
            seed,
            log_level,
            log_json,
        })
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("=== Customer Backend Configuration ===");
        println!("Port: {}", self.port);
        println!("Store: {}", self.store);
        if self.store == StoreKind::Sqlite {
            println!("Database: {}", self.db_path.display());
        } else {
            println!("Seed Demo Customers: {}", self.seed);
        }
        println!("Log Level: {}", self.log_level);
        println!("JSON Logs: {}", self.log_json);
        println!("======================================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_store_kind_parsing() {
        assert_eq!("sqlite".parse::<StoreKind>().unwrap(), StoreKind::Sqlite);
        assert_eq!("MEMORY".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert!("postgres".parse::<StoreKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.port, DEFAULT_API_PORT);
        assert_eq!(config.store, StoreKind::Sqlite);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert!(!config.seed);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("CUSTOMER_API_PORT", "3001"),
            ("CUSTOMER_STORE", "memory"),
            ("CUSTOMER_SEED", "1"),
            ("CUSTOMER_LOG_JSON", "1"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.store, StoreKind::Memory);
        assert!(config.seed);
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_lookup(lookup_from(&[("CUSTOMER_API_PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_, _))));
    }
}
