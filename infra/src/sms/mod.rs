//! SMS Service Module
//!
//! This module provides SMS service implementations for sending verification
//! codes: an HTTP gateway client for production and a mock implementation
//! for development.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **HTTP Gateway**: GET-based gateway with retry and backoff
//! - **Security**: Phone number masking in logs

pub mod adapter;
pub mod http_gateway;
pub mod mock_sms;
pub mod sms_service;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use http_gateway::HttpSmsGateway;
pub use mock_sms::MockSmsService;
pub use sms_service::{is_valid_destination, SmsService};

use pp_shared::{Environment, SmsConfig};

use crate::InfrastructureError;

/// Create an SMS service based on configuration
///
/// # Arguments
///
/// * `config` - SMS configuration containing provider settings
/// * `environment` - Development is the only environment where a missing or
///   broken gateway falls back to the console mock
///
/// # Returns
///
/// A boxed SMS service implementation, or a configuration error outside
/// development when the configured provider cannot be used
pub fn create_sms_service(
    config: &SmsConfig,
    environment: Environment,
) -> Result<Box<dyn SmsService>, InfrastructureError> {
    let console_mock = || Box::new(MockSmsService::with_options(true, false)) as Box<dyn SmsService>;

    match config.provider.as_str() {
        "mock" if environment.is_production() => Err(InfrastructureError::Config(
            "SMS_PROVIDER=mock cannot deliver codes in production".to_string(),
        )),
        "mock" if environment.is_development() => Ok(console_mock()),
        "mock" => Ok(Box::new(MockSmsService::with_options(false, false))),
        "gateway" | "http" => match HttpSmsGateway::new(config.clone()) {
            Ok(service) => Ok(Box::new(service)),
            Err(e) if environment.is_development() => {
                tracing::error!("Failed to initialize SMS gateway: {}", e);
                tracing::warn!("Falling back to mock SMS service");
                Ok(console_mock())
            }
            Err(e) => Err(e),
        },
        other if environment.is_development() => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                other
            );
            Ok(console_mock())
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown SMS provider '{}'",
            other
        ))),
    }
}
