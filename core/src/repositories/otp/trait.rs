//! OTP store trait defining the interface for passcode persistence.
//!
//! The store is the only shared mutable resource of the workflow. The two
//! read-then-write sequences (`consume` and `replace_if_idle`) are part of
//! the contract so that every backend can make them atomic in its own way.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;

/// Result of an atomic lookup-and-delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// A fresh record matched; `deleted` rows sharing the code were removed
    Consumed { record: OtpRecord, deleted: u64 },
    /// A record matched but was issued too long ago; nothing was deleted
    Expired { issued_at: DateTime<Utc> },
    /// No record matched the contact and code
    NotFound,
}

/// Result of an atomic throttle-check-and-supersede
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The new record was stored after removing `superseded` older rows
    Replaced { superseded: u64 },
    /// The latest record is still inside the resend window; nothing changed
    Throttled { latest_issued_at: DateTime<Utc> },
}

/// Repository trait for OTP record persistence
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use chrono::{DateTime, Utc};
/// use pp_core::domain::entities::OtpRecord;
/// use pp_core::errors::DomainError;
/// use pp_core::repositories::{ConsumeOutcome, OtpStore, ReplaceOutcome};
///
/// struct RedisOtpStore {
///     // connection handle
/// }
///
/// #[async_trait]
/// impl OtpStore for RedisOtpStore {
///     async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
///         Ok(record)
///     }
///
///     // ... other methods
/// #   async fn find_latest(&self, _: &str) -> Result<Option<OtpRecord>, DomainError> { Ok(None) }
/// #   async fn find_by_code(&self, _: &str, _: &str) -> Result<Option<OtpRecord>, DomainError> { Ok(None) }
/// #   async fn consume(&self, _: &str, _: &str, _: DateTime<Utc>) -> Result<ConsumeOutcome, DomainError> { Ok(ConsumeOutcome::NotFound) }
/// #   async fn replace_if_idle(&self, _: OtpRecord, _: DateTime<Utc>) -> Result<ReplaceOutcome, DomainError> { Ok(ReplaceOutcome::Replaced { superseded: 0 }) }
/// #   async fn delete_for(&self, _: &str) -> Result<u64, DomainError> { Ok(0) }
/// #   async fn purge_issued_before(&self, _: DateTime<Utc>) -> Result<u64, DomainError> { Ok(0) }
/// #   async fn count_for(&self, _: &str) -> Result<u64, DomainError> { Ok(0) }
/// }
/// ```
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Persist a newly issued record
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Most recent record for a contact, ordered by `issued_at` descending
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Latest record found
    /// * `Ok(None)` - No record was ever issued (or all were consumed)
    /// * `Err(DomainError)` - Storage failure
    async fn find_latest(&self, verification_type: &str)
        -> Result<Option<OtpRecord>, DomainError>;

    /// Most recent record matching both contact and code exactly
    async fn find_by_code(
        &self,
        verification_type: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Atomically look up a code and delete it when fresh
    ///
    /// The most recent record matching `verification_type` and `code` is
    /// fresh when `issued_at > issued_after`. A fresh match deletes every
    /// record that shares the code value. Two concurrent calls for the same
    /// code never both observe `Consumed`.
    async fn consume(
        &self,
        verification_type: &str,
        code: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<ConsumeOutcome, DomainError>;

    /// Atomically insert `record` unless the contact was issued a code
    /// after `idle_since`
    ///
    /// On success every older record for the contact is removed before the
    /// insert, so a superseded code can never verify again.
    async fn replace_if_idle(
        &self,
        record: OtpRecord,
        idle_since: DateTime<Utc>,
    ) -> Result<ReplaceOutcome, DomainError>;

    /// Delete all records for a contact, returning how many were removed
    async fn delete_for(&self, verification_type: &str) -> Result<u64, DomainError>;

    /// Delete records issued at or before `cutoff`
    async fn purge_issued_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Number of records currently held for a contact
    async fn count_for(&self, verification_type: &str) -> Result<u64, DomainError>;
}
