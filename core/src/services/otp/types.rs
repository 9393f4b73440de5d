//! Types for OTP service results

use chrono::{DateTime, Utc};

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::{Contact, ContactKind};

/// Result of sending (or resending) a code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The record that was stored
    pub record: OtpRecord,
    /// Channel the code went out on
    pub channel: ContactKind,
    /// Message id from the email provider or SMS gateway
    pub message_id: String,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyCodeResult {
    /// The verified contact
    pub contact: Contact,
    /// Whether a user record was flagged verified
    pub user_marked: bool,
    /// Rows removed by the consumption
    pub codes_deleted: u64,
}

impl VerifyCodeResult {
    pub fn channel(&self) -> ContactKind {
        self.contact.kind()
    }
}
