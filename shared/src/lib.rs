//! Shared utilities and common types for the PayProtect server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response envelope
//! - Utility functions (contact masking for logs)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, EmailConfig, Environment, LoggingConfig, OtpConfig, ServerConfig,
    SmsConfig, StoreBackend,
};
pub use types::ApiResponse;
pub use utils::masking;
