//! Configuration for the OTP services

use chrono::Duration;
use pp_shared::OtpConfig;

use crate::domain::entities::{CODE_LENGTH, RESEND_WINDOW_MINUTES, VALIDITY_WINDOW_MINUTES};

/// Configuration for the OTP workflow service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of digits in an issued code
    pub code_length: usize,
    /// Minutes an issued code stays verifiable
    pub validity_minutes: i64,
    /// Minutes during which a resend is refused
    pub resend_window_minutes: i64,
    /// Product name used in message templates
    pub brand_name: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            validity_minutes: VALIDITY_WINDOW_MINUTES,
            resend_window_minutes: RESEND_WINDOW_MINUTES,
            brand_name: "PayProtect".to_string(),
        }
    }
}

impl OtpServiceConfig {
    pub fn validity(&self) -> Duration {
        Duration::minutes(self.validity_minutes)
    }

    pub fn resend_window(&self) -> Duration {
        Duration::minutes(self.resend_window_minutes)
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            validity_minutes: config.validity_minutes,
            resend_window_minutes: config.resend_window_minutes,
            brand_name: config.brand_name.clone(),
        }
    }
}

/// Configuration for the expired-record cleanup job
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Minutes past expiry before a record is deleted
    pub grace_minutes: i64,
    /// Validity window the grace period is added to
    pub validity_minutes: i64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 900,
            grace_minutes: 60,
            validity_minutes: VALIDITY_WINDOW_MINUTES,
            enabled: true,
        }
    }
}

impl OtpCleanupConfig {
    /// Records issued at or before `now - retention()` are purged
    pub fn retention(&self) -> Duration {
        Duration::minutes(self.validity_minutes + self.grace_minutes)
    }
}

impl From<&OtpConfig> for OtpCleanupConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_secs,
            grace_minutes: config.cleanup_grace_minutes,
            validity_minutes: config.validity_minutes,
            enabled: config.cleanup_enabled,
        }
    }
}
