//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS service for development and testing.
//! Messages are counted and logged instead of sent. Console output is opt-in
//! and shows the masked destination only.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use pp_shared::masking::mask_phone_number;

use super::sms_service::{is_valid_destination, SmsService};
use crate::InfrastructureError;

/// Mock SMS service for development and testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockSmsService {
    /// Create a silent mock SMS service
    pub fn new() -> Self {
        Self::with_options(false, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, destination: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_destination(destination) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid destination: {}",
                mask_phone_number(destination)
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                "Mock SMS service simulating failure for phone: {}",
                mask_phone_number(destination)
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let masked_phone = mask_phone_number(destination);

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", masked_phone);
            println!("Message ID: {}", message_id);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sms_send_success() {
        let service = MockSmsService::with_options(false, false);
        let result = service.send_sms("2348012345678", "Test message").await;

        let message_id = result.unwrap();
        assert!(message_id.starts_with("mock_"));
        assert_eq!(service.get_message_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_sms_rejects_plus_prefix() {
        let service = MockSmsService::with_options(false, false);
        let result = service.send_sms("+2348012345678", "Test message").await;

        match result {
            Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("Invalid destination")),
            other => panic!("Expected Sms error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_sms_simulate_failure() {
        let service = MockSmsService::with_options(false, false);
        service.set_simulate_failure(true);

        assert!(service.send_sms("14155552671", "Test").await.is_err());
        assert_eq!(service.get_message_count(), 0);
    }
}
