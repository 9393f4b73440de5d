//! Traits for email and SMS delivery integration

use async_trait::async_trait;

/// Trait for email delivery integration
#[async_trait]
pub trait EmailSenderTrait: Send + Sync {
    /// Send a plain-text email; returns the provider message id
    async fn send_email(
        &self,
        subject: &str,
        body: &str,
        recipients: &[String],
    ) -> Result<String, String>;
}

/// Trait for SMS gateway integration
#[async_trait]
pub trait SmsSenderTrait: Send + Sync {
    /// Send a text to a destination without its leading '+'; returns the gateway reference
    async fn send_sms(&self, destination: &str, message: &str) -> Result<String, String>;
}
