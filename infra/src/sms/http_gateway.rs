//! HTTP SMS Gateway Implementation
//!
//! Sends messages with a GET request to the configured gateway endpoint.
//! Credentials, sender, recipient, text and route travel as query parameters.
//!
//! ## Features
//!
//! - Bounded retries with exponential backoff on 5xx and transport errors
//! - No retry on 4xx; the request itself is wrong
//! - Phone number masking in logs

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use pp_shared::masking::mask_phone_number;
use pp_shared::SmsConfig;

use crate::{
    sms::sms_service::{is_valid_destination, SmsService},
    InfrastructureError,
};

/// Longest text the gateway accepts in one request
const MAX_MESSAGE_LENGTH: usize = 918;

/// Reference fields a gateway may return in a JSON body
#[derive(Debug, Deserialize)]
struct GatewayReply {
    #[serde(alias = "message_id", alias = "messageId", alias = "id")]
    reference: Option<String>,
}

/// SMS service backed by an HTTP gateway
pub struct HttpSmsGateway {
    client: reqwest::Client,
    config: SmsConfig,
}

impl HttpSmsGateway {
    /// Create a new gateway client
    pub fn new(config: SmsConfig) -> Result<Self, InfrastructureError> {
        if config.gateway_url.is_empty() {
            return Err(InfrastructureError::Config(
                "SMS_GATEWAY_URL must be set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "SMS gateway initialized with sender id: {}",
            config.sender_id
        );

        Ok(Self { client, config })
    }

    /// Pull a reference out of the gateway body, or mint one
    fn parse_reference(body: &str) -> String {
        let body = body.trim();
        if let Ok(GatewayReply {
            reference: Some(reference),
        }) = serde_json::from_str::<GatewayReply>(body)
        {
            return reference;
        }
        if !body.is_empty() && !body.starts_with('{') && body.len() <= 128 {
            return body.to_string();
        }
        format!("sms_{}", Uuid::new_v4())
    }

    /// Reference for an accepted message whose body may not have been readable
    fn reference_from_body<E: std::fmt::Display>(body: Result<String, E>) -> String {
        match body {
            Ok(body) => Self::parse_reference(&body),
            Err(e) => {
                warn!(
                    "Could not read SMS gateway response body, minting a reference: {}",
                    e
                );
                Self::parse_reference("")
            }
        }
    }

    /// Send SMS with retry logic
    async fn send_with_retry(
        &self,
        destination: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                max_attempts,
                mask_phone_number(destination)
            );

            let result = self
                .client
                .get(&self.config.gateway_url)
                .query(&[
                    ("api_token", self.config.api_token.as_str()),
                    ("sender_id", self.config.sender_id.as_str()),
                    ("recipient", destination),
                    ("message", message),
                    ("gateway_id", self.config.gateway_id.as_str()),
                ])
                .send()
                .await;

            let failure = match result {
                Ok(response) if response.status().is_success() => {
                    let reference = Self::reference_from_body(response.text().await);
                    info!(
                        "SMS sent successfully to {} with reference: {}",
                        mask_phone_number(destination),
                        reference
                    );
                    return Ok(reference);
                }
                Ok(response) if response.status().is_client_error() => {
                    let status = response.status();
                    error!("SMS gateway rejected the request with {}", status);
                    return Err(InfrastructureError::Sms(format!(
                        "Gateway rejected request: {}",
                        status
                    )));
                }
                Ok(response) => format!("gateway returned {}", response.status()),
                Err(e) => e.to_string(),
            };

            error!(
                "Failed to send SMS (attempt {}/{}): {}",
                attempts, max_attempts, failure
            );

            if attempts >= max_attempts {
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    max_attempts, failure
                )));
            }

            warn!("Retrying SMS after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl SmsService for HttpSmsGateway {
    async fn send_sms(&self, destination: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_destination(destination) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid destination: {}",
                mask_phone_number(destination)
            )));
        }

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        info!(
            "Sending SMS to {} via gateway (message length: {} chars)",
            mask_phone_number(destination),
            message.len()
        );

        self.send_with_retry(destination, message).await
    }

    fn provider_name(&self) -> &str {
        "Gateway"
    }
}
