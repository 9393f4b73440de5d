//! One-time passcode workflow configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string};

/// Longest code a client can submit; verify requests carry the code as an
/// integer of at most six digits
pub const MAX_CODE_LENGTH: usize = 6;

/// OTP issuance, validity, and housekeeping settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of decimal digits in an issued code
    pub code_length: usize,

    /// Minutes an issued code stays verifiable
    pub validity_minutes: i64,

    /// Minutes during which a resend for the same contact is refused
    pub resend_window_minutes: i64,

    /// Product name embedded in outgoing messages
    pub brand_name: String,

    /// Run the periodic purge of expired codes
    #[serde(default = "default_cleanup_enabled")]
    pub cleanup_enabled: bool,

    /// Seconds between purge runs
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,

    /// Minutes an expired code is kept before the purge deletes it
    #[serde(default = "default_cleanup_grace_minutes")]
    pub cleanup_grace_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            validity_minutes: 10,
            resend_window_minutes: 5,
            brand_name: String::from("PayProtect"),
            cleanup_enabled: default_cleanup_enabled(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            cleanup_grace_minutes: default_cleanup_grace_minutes(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: env_parse("OTP_CODE_LENGTH", defaults.code_length),
            validity_minutes: env_parse("OTP_VALIDITY_MINUTES", defaults.validity_minutes),
            resend_window_minutes: env_parse(
                "OTP_RESEND_WINDOW_MINUTES",
                defaults.resend_window_minutes,
            ),
            brand_name: env_string("OTP_BRAND_NAME", &defaults.brand_name),
            cleanup_enabled: env_parse("OTP_CLEANUP_ENABLED", defaults.cleanup_enabled),
            cleanup_interval_secs: env_parse(
                "OTP_CLEANUP_INTERVAL_SECS",
                defaults.cleanup_interval_secs,
            ),
            cleanup_grace_minutes: env_parse(
                "OTP_CLEANUP_GRACE_MINUTES",
                defaults.cleanup_grace_minutes,
            ),
        }
    }

    /// Reject settings under which issued codes could never verify
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(format!(
                "OTP_CODE_LENGTH must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, self.code_length
            ));
        }
        if self.validity_minutes <= 0 {
            return Err(format!(
                "OTP_VALIDITY_MINUTES must be positive, got {}",
                self.validity_minutes
            ));
        }
        if self.resend_window_minutes < 0 || self.resend_window_minutes >= self.validity_minutes {
            return Err(format!(
                "OTP_RESEND_WINDOW_MINUTES must be in 0..{}, got {}",
                self.validity_minutes, self.resend_window_minutes
            ));
        }
        Ok(())
    }
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_interval_secs() -> u64 {
    900
}

fn default_cleanup_grace_minutes() -> i64 {
    60
}
