//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them. With console output enabled (the
//! factory only does so in development) the body is printed so the flow can
//! be exercised without an SMTP relay; recipients stay masked.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use pp_shared::masking::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Mock email service for development and testing
#[derive(Clone)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    simulate_failure: Arc<AtomicBool>,
    console_output: bool,
}

impl MockEmailService {
    /// Create a silent mock email service
    pub fn new() -> Self {
        Self::with_options(false, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages accepted so far
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if message.recipients.is_empty() {
            return Err(InfrastructureError::Email("No recipients".to_string()));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("Mock email service simulating failure");
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let recipients: Vec<String> = message.recipients.iter().map(|r| mask_email(r)).collect();

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL SERVICE");
            println!("{}", "=".repeat(60));
            println!("To: {}", recipients.join(", "));
            println!("Subject: {}", message.subject);
            println!("Message ID: {}", message_id);
            println!("{}", message.body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "mock",
            recipients = ?recipients,
            message_id = %message_id,
            "Email sent successfully (mock)"
        );

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
