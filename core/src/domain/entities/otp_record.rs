//! OTP record entity for email/phone contact verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of an issued code
pub const CODE_LENGTH: usize = 6;

/// Minutes an issued code may still be consumed
pub const VALIDITY_WINDOW_MINUTES: i64 = 10;

/// Minutes during which a resend for the same contact is refused
pub const RESEND_WINDOW_MINUTES: i64 = 5;

/// A one-time passcode issued for a single contact identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the stored row
    pub id: Uuid,

    /// Contact the code was issued for (email address or phone number)
    pub verification_type: String,

    /// Fixed-length decimal code
    pub code: String,

    /// When the code was issued; never changes after creation
    pub issued_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record for `verification_type` issued at `issued_at`
    ///
    /// # Arguments
    ///
    /// * `verification_type` - The contact identifier the code is bound to
    /// * `code` - The generated code
    /// * `issued_at` - Issue timestamp taken from the service clock
    pub fn new(
        verification_type: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            verification_type: verification_type.into(),
            code: code.into(),
            issued_at,
        }
    }

    /// Time elapsed since the code was issued
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// Whether the code can still be consumed at `now`
    ///
    /// A code is fresh while `now - issued_at < validity`.
    pub fn is_fresh(&self, now: DateTime<Utc>, validity: Duration) -> bool {
        self.age(now) < validity
    }

    /// Whether a resend requested at `now` falls inside the suppression window
    pub fn blocks_resend(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) < window
    }

    /// Instant at which the code stops verifying
    pub fn expires_at(&self, validity: Duration) -> DateTime<Utc> {
        self.issued_at + validity
    }

    /// Earliest instant at which a resend is accepted
    pub fn resend_allowed_at(&self, window: Duration) -> DateTime<Utc> {
        self.issued_at + window
    }

    /// Compare `candidate` against the stored code in constant time
    pub fn matches_code(&self, candidate: &str) -> bool {
        self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn validity() -> Duration {
        Duration::minutes(VALIDITY_WINDOW_MINUTES)
    }

    #[test]
    fn test_new_record() {
        let record = OtpRecord::new("user@example.com", "483920", issued_at());

        assert_eq!(record.verification_type, "user@example.com");
        assert_eq!(record.code, "483920");
        assert_eq!(record.issued_at, issued_at());
        assert_ne!(record.id, OtpRecord::new("user@example.com", "483920", issued_at()).id);
    }

    #[test]
    fn test_freshness_boundary() {
        let record = OtpRecord::new("user@example.com", "483920", issued_at());

        assert!(record.is_fresh(issued_at() + Duration::minutes(1), validity()));
        assert!(record.is_fresh(issued_at() + validity() - Duration::seconds(1), validity()));
        // Exactly at the boundary the code is already expired
        assert!(!record.is_fresh(issued_at() + validity(), validity()));
        assert!(!record.is_fresh(issued_at() + Duration::minutes(11), validity()));
    }

    #[test]
    fn test_resend_window_boundary() {
        let record = OtpRecord::new("+2348012345678", "000123", issued_at());
        let window = Duration::minutes(RESEND_WINDOW_MINUTES);

        assert!(record.blocks_resend(issued_at() + Duration::minutes(4), window));
        assert!(!record.blocks_resend(issued_at() + window, window));
        assert_eq!(record.resend_allowed_at(window), issued_at() + window);
        assert_eq!(record.expires_at(validity()), issued_at() + validity());
    }

    #[test]
    fn test_matches_code() {
        let record = OtpRecord::new("user@example.com", "012345", issued_at());

        assert!(record.matches_code("012345"));
        assert!(!record.matches_code("12345"));
        assert!(!record.matches_code("012346"));
    }

    #[test]
    fn test_serialization() {
        let record = OtpRecord::new("user@example.com", "483920", issued_at());

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: OtpRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
