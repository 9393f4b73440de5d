//! Contact identifiers a one-time passcode can be bound to.
//!
//! Classification is a pure function over fully anchored patterns so that a
//! string containing an address somewhere inside it never classifies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::OtpError;

// RFC 5322-lite: local@domain.tld with a letters-only TLD
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .unwrap()
});

// E.164-like: optional '+', 7 to 15 digits
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap());

/// Maximum length of an email address (RFC 5321 path limit)
const MAX_EMAIL_LENGTH: usize = 254;

/// Channel a contact string belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
    Invalid,
}

impl ContactKind {
    /// Classify a raw contact string
    ///
    /// The email pattern is tried first; the phone pattern only when it fails.
    pub fn classify(contact: &str) -> Self {
        if contact.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(contact) {
            ContactKind::Email
        } else if PHONE_REGEX.is_match(contact) {
            ContactKind::Phone
        } else {
            ContactKind::Invalid
        }
    }

    /// Short channel name used in logs and receipts
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact string that classified as email or phone
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    value: String,
    kind: ContactKind,
}

impl Contact {
    /// Parse and classify a raw contact string
    ///
    /// Surrounding whitespace is trimmed; the trimmed value is what the
    /// code gets bound to.
    ///
    /// # Returns
    ///
    /// * `Ok(Contact)` - An email or phone contact
    /// * `Err(OtpError::InvalidContact)` - Matches neither pattern
    pub fn parse(raw: &str) -> Result<Self, OtpError> {
        let value = raw.trim();
        match ContactKind::classify(value) {
            ContactKind::Invalid => Err(OtpError::InvalidContact {
                contact: value.to_string(),
            }),
            kind => Ok(Self {
                value: value.to_string(),
                kind,
            }),
        }
    }

    /// The contact identifier as stored in `verification_type`
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    pub fn is_email(&self) -> bool {
        self.kind == ContactKind::Email
    }

    /// Destination handed to the SMS gateway: the number without its '+'
    pub fn sms_destination(&self) -> &str {
        self.value.trim_start_matches('+')
    }

    /// Masked form for logging
    pub fn masked(&self) -> String {
        pp_shared::masking::mask_contact(&self.value)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
