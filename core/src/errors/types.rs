//! Error types for the one-time passcode workflow
//!
//! Each variant carries enough context for logging; the presentation layer
//! decides the user-facing wording and the HTTP status.

use thiserror::Error;

/// Failures of the send, resend, and verify operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// Contact matched neither the email nor the phone pattern
    #[error("Invalid contact: {contact}")]
    InvalidContact { contact: String },

    /// A code was issued for this contact inside the resend window
    #[error("Resend throttled, retry in {retry_after_secs} seconds")]
    Throttled { retry_after_secs: i64 },

    /// The email or SMS channel rejected the message
    #[error("Delivery over {channel} failed: {reason}")]
    DeliveryFailed { channel: String, reason: String },

    /// No stored code matches, or the matching code is too old
    #[error("Invalid or expired code")]
    InvalidOrExpired,
}

impl OtpError {
    /// Stable machine-readable code for logs and metrics labels
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::InvalidContact { .. } => "INVALID_CONTACT",
            OtpError::Throttled { .. } => "RESEND_THROTTLED",
            OtpError::DeliveryFailed { .. } => "DELIVERY_FAILED",
            OtpError::InvalidOrExpired => "INVALID_OR_EXPIRED",
        }
    }
}
