//! SMS Service Trait Adapter
//!
//! Bridges an infrastructure SmsService to the core SmsSenderTrait.

use async_trait::async_trait;
use pp_core::services::otp::SmsSenderTrait;

use super::sms_service::SmsService;

/// Adapter that implements the core SmsSenderTrait
pub struct SmsServiceAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsServiceAdapter {
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsSenderTrait for SmsServiceAdapter {
    async fn send_sms(&self, destination: &str, message: &str) -> Result<String, String> {
        match self.inner.send_sms(destination, message).await {
            Ok(reference) => Ok(reference),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::MockSmsService;

    #[tokio::test]
    async fn test_adapter_forwards_to_service() {
        let mock = MockSmsService::with_options(false, false);
        let adapter = SmsServiceAdapter::new(Box::new(mock.clone()));

        let reference = adapter.send_sms("14155552671", "Code 123456").await.unwrap();

        assert!(reference.starts_with("mock_"));
        assert_eq!(mock.get_message_count(), 1);
        assert_eq!(adapter.provider_name(), "Mock");
    }

    #[tokio::test]
    async fn test_adapter_stringifies_errors() {
        let adapter = SmsServiceAdapter::new(Box::new(MockSmsService::with_options(false, true)));

        let err = adapter.send_sms("14155552671", "Code").await.unwrap_err();
        assert!(err.starts_with("SMS service error"));
    }
}
