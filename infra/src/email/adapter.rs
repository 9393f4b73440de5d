//! Email Service Trait Adapter
//!
//! Bridges an infrastructure EmailService to the core EmailSenderTrait.

use async_trait::async_trait;
use pp_core::services::otp::EmailSenderTrait;

use super::email_service::{EmailMessage, EmailService};

/// Adapter that implements the core EmailSenderTrait
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
    from_address: String,
}

impl EmailServiceAdapter {
    /// Wrap `inner`, stamping every message with `from_address`
    pub fn new(inner: Box<dyn EmailService>, from_address: impl Into<String>) -> Self {
        Self {
            inner,
            from_address: from_address.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailSenderTrait for EmailServiceAdapter {
    async fn send_email(
        &self,
        subject: &str,
        body: &str,
        recipients: &[String],
    ) -> Result<String, String> {
        let message = EmailMessage {
            subject: subject.to_string(),
            body: body.to_string(),
            from: self.from_address.clone(),
            recipients: recipients.to_vec(),
        };

        self.inner.send(&message).await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::MockEmailService;

    #[tokio::test]
    async fn test_adapter_sets_sender() {
        let mock = MockEmailService::with_options(false, false);
        let adapter = EmailServiceAdapter::new(Box::new(mock.clone()), "PayProtect <otp@payprotect.local>");

        adapter
            .send_email("Subject", "Body", &["user@example.com".to_string()])
            .await
            .unwrap();

        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "PayProtect <otp@payprotect.local>");
        assert_eq!(adapter.provider_name(), "Mock");
    }

    #[tokio::test]
    async fn test_adapter_stringifies_errors() {
        let mock = MockEmailService::with_options(false, true);
        let adapter = EmailServiceAdapter::new(Box::new(mock), "otp@payprotect.local");

        let err = adapter
            .send_email("Subject", "Body", &["user@example.com".to_string()])
            .await
            .unwrap_err();

        assert!(err.contains("Simulated"));
    }
}
