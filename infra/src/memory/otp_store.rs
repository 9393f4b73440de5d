//! In-memory OTP store
//!
//! Records are grouped per contact. Every operation takes the single
//! `tokio::sync::Mutex` guard and holds it across its whole read-then-write
//! sequence, which makes `consume` and `replace_if_idle` atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use pp_core::domain::entities::OtpRecord;
use pp_core::errors::DomainError;
use pp_core::repositories::{ConsumeOutcome, OtpStore, ReplaceOutcome};

/// Records keyed by contact identifier, oldest first within each contact
type Records = HashMap<String, Vec<OtpRecord>>;

/// Process-local OTP store
#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<Mutex<Records>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all contacts
    pub async fn len(&self) -> usize {
        self.records.lock().await.values().map(Vec::len).sum()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn latest<'a>(
    records: &'a Records,
    verification_type: &str,
    code: Option<&str>,
) -> Option<&'a OtpRecord> {
    records
        .get(verification_type)?
        .iter()
        .filter(|r| code.map_or(true, |c| r.matches_code(c)))
        .max_by_key(|r| r.issued_at)
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.lock().await;
        records
            .entry(record.verification_type.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn find_latest(
        &self,
        verification_type: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.lock().await;
        Ok(latest(&records, verification_type, None).cloned())
    }

    async fn find_by_code(
        &self,
        verification_type: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.lock().await;
        Ok(latest(&records, verification_type, Some(code)).cloned())
    }

    async fn consume(
        &self,
        verification_type: &str,
        code: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<ConsumeOutcome, DomainError> {
        let mut records = self.records.lock().await;

        let record = match latest(&records, verification_type, Some(code)) {
            Some(record) => record.clone(),
            None => return Ok(ConsumeOutcome::NotFound),
        };

        if record.issued_at <= issued_after {
            return Ok(ConsumeOutcome::Expired {
                issued_at: record.issued_at,
            });
        }

        // The code value is retired everywhere, not only for this contact
        let mut deleted = 0u64;
        for list in records.values_mut() {
            let before = list.len();
            list.retain(|r| !r.matches_code(code));
            deleted += (before - list.len()) as u64;
        }
        records.retain(|_, list| !list.is_empty());

        debug!(deleted = deleted, "Consumed OTP records");

        Ok(ConsumeOutcome::Consumed { record, deleted })
    }

    async fn replace_if_idle(
        &self,
        record: OtpRecord,
        idle_since: DateTime<Utc>,
    ) -> Result<ReplaceOutcome, DomainError> {
        let mut records = self.records.lock().await;

        if let Some(current) = latest(&records, &record.verification_type, None) {
            if current.issued_at > idle_since {
                return Ok(ReplaceOutcome::Throttled {
                    latest_issued_at: current.issued_at,
                });
            }
        }

        let superseded = records
            .insert(record.verification_type.clone(), vec![record])
            .map_or(0, |old| old.len() as u64);

        Ok(ReplaceOutcome::Replaced { superseded })
    }

    async fn delete_for(&self, verification_type: &str) -> Result<u64, DomainError> {
        let mut records = self.records.lock().await;
        Ok(records
            .remove(verification_type)
            .map_or(0, |old| old.len() as u64))
    }

    async fn purge_issued_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.lock().await;
        let mut purged = 0u64;
        for list in records.values_mut() {
            let before = list.len();
            list.retain(|r| r.issued_at > cutoff);
            purged += (before - list.len()) as u64;
        }
        records.retain(|_, list| !list.is_empty());
        Ok(purged)
    }

    async fn count_for(&self, verification_type: &str) -> Result<u64, DomainError> {
        let records = self.records.lock().await;
        Ok(records
            .get(verification_type)
            .map_or(0, |list| list.len() as u64))
    }
}
