//! Delivery channel configuration (email over SMTP, SMS over an HTTP gateway)

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name ("smtp", "mock")
    pub provider: String,
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP submission port
    pub smtp_port: u16,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    #[serde(skip_serializing, default)]
    pub smtp_password: String,
    /// Sender address placed in the From header
    pub from_address: String,
    /// Timeout for a single SMTP exchange in seconds
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::from("PayProtect <no-reply@payprotect.local>"),
            timeout_secs: 30,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_string("EMAIL_PROVIDER", &defaults.provider),
            smtp_host: env_string("SMTP_HOST", &defaults.smtp_host),
            smtp_port: env_parse("SMTP_PORT", defaults.smtp_port),
            smtp_username: env_string("SMTP_USERNAME", ""),
            smtp_password: env_string("SMTP_PASSWORD", ""),
            from_address: env_string("EMAIL_FROM", &defaults.from_address),
            timeout_secs: env_parse("SMTP_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }
}

/// SMS gateway configuration
///
/// The gateway is reached with an HTTP GET; `gateway_url` is the base
/// endpoint and the remaining fields travel as query parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Provider name ("gateway", "mock")
    pub provider: String,
    /// Gateway endpoint
    pub gateway_url: String,
    /// API token issued by the gateway
    #[serde(skip_serializing, default)]
    pub api_token: String,
    /// Registered sender id shown to recipients
    pub sender_id: String,
    /// Gateway route id
    pub gateway_id: String,
    /// Maximum attempts for a single message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for gateway requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            gateway_url: String::from("http://localhost:9090/api/v1/sms/send"),
            api_token: String::new(),
            sender_id: String::from("PayProtect"),
            gateway_id: String::from("1"),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_string("SMS_PROVIDER", &defaults.provider),
            gateway_url: env_string("SMS_GATEWAY_URL", &defaults.gateway_url),
            api_token: env_string("SMS_API_TOKEN", ""),
            sender_id: env_string("SMS_SENDER_ID", &defaults.sender_id),
            gateway_id: env_string("SMS_GATEWAY_ID", &defaults.gateway_id),
            max_retries: env_parse("SMS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_parse("SMS_RETRY_DELAY_MS", defaults.retry_delay_ms),
            request_timeout_secs: env_parse(
                "SMS_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        }
    }
}
