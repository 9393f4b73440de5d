//! SMS Service Interface
//!
//! Defines the trait for SMS transports. Destinations are international
//! numbers without the leading `+`, which is what the gateway expects.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - HTTP SMS gateway
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message
    ///
    /// # Arguments
    ///
    /// * `destination` - Recipient digits, e.g. `2348012345678`
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(reference)` - Gateway reference for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, destination: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// Whether `destination` is a plausible gateway destination (7 to 15 digits)
pub fn is_valid_destination(destination: &str) -> bool {
    (7..=15).contains(&destination.len()) && destination.chars().all(|c| c.is_ascii_digit())
}
