//! Email Service Interface
//!
//! Defines the trait for email transports and the message they carry.

use async_trait::async_trait;

use crate::InfrastructureError;

/// A plain-text email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Sender mailbox, either `addr@host` or `Name <addr@host>`
    pub from: String,
    /// Recipient addresses
    pub recipients: Vec<String>,
}

/// Email service trait for sending messages
///
/// Implementations include:
/// - SMTP via lettre
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message to all of its recipients
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier assigned to the sent message
    /// * `Err(InfrastructureError)` - If the message is malformed or the relay refused it
    async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
