//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - MySQL connection and pool configuration
//! - `delivery` - Email (SMTP) and SMS gateway settings
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Code length, validity and resend windows, cleanup job
//! - `server` - HTTP server configuration

pub mod database;
pub mod delivery;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use delivery::{EmailConfig, SmsConfig};
pub use environment::{Environment, LoggingConfig};
pub use otp::{OtpConfig, MAX_CODE_LENGTH};
pub use server::ServerConfig;

/// Where issued codes are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// MySQL via sqlx
    Mysql,
    /// Process-local store, for development and tests
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::Mysql),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Store backend selection
    pub store_backend: StoreBackend,

    /// OTP workflow configuration
    pub otp: OtpConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// SMS delivery configuration
    pub sms: SmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            store_backend: StoreBackend::Memory,
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Development defaults to the in-memory store; staging and production
    /// default to MySQL. `STORE_BACKEND` overrides either.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let default_backend = if environment.is_development() {
            StoreBackend::Memory
        } else {
            StoreBackend::Mysql
        };

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            store_backend: env_parse("STORE_BACKEND", default_backend),
            otp: OtpConfig::from_env(),
            email: EmailConfig::from_env(),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Check cross-field constraints the individual parsers cannot see
    pub fn validate(&self) -> Result<(), String> {
        self.otp.validate()
    }
}

/// Read and parse an environment variable, falling back to `default`
/// when it is unset or malformed.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read a string environment variable with a default
pub(crate) fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
