//! Mock implementation of OtpStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;

use super::trait_::{ConsumeOutcome, OtpStore, ReplaceOutcome};

/// Mock OTP store for testing
#[derive(Clone, Default)]
pub struct MockOtpStore {
    records: Arc<Mutex<Vec<OtpRecord>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockOtpStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail with an internal error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all stored records
    pub async fn all(&self) -> Vec<OtpRecord> {
        self.records.lock().await.clone()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "mock store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn latest_where<'a>(
    records: &'a [OtpRecord],
    pred: impl Fn(&OtpRecord) -> bool,
) -> Option<&'a OtpRecord> {
    records
        .iter()
        .filter(|r| pred(r))
        .max_by_key(|r| r.issued_at)
}

#[async_trait]
impl OtpStore for MockOtpStore {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check_writable()?;
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn find_latest(
        &self,
        verification_type: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.lock().await;
        Ok(latest_where(&records, |r| r.verification_type == verification_type).cloned())
    }

    async fn find_by_code(
        &self,
        verification_type: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.lock().await;
        Ok(latest_where(&records, |r| {
            r.verification_type == verification_type && r.matches_code(code)
        })
        .cloned())
    }

    async fn consume(
        &self,
        verification_type: &str,
        code: &str,
        issued_after: DateTime<Utc>,
    ) -> Result<ConsumeOutcome, DomainError> {
        self.check_writable()?;
        let mut records = self.records.lock().await;

        let found = latest_where(&records, |r| {
            r.verification_type == verification_type && r.matches_code(code)
        })
        .cloned();

        match found {
            None => Ok(ConsumeOutcome::NotFound),
            Some(record) if record.issued_at <= issued_after => Ok(ConsumeOutcome::Expired {
                issued_at: record.issued_at,
            }),
            Some(record) => {
                let before = records.len();
                records.retain(|r| !r.matches_code(code));
                let deleted = (before - records.len()) as u64;
                Ok(ConsumeOutcome::Consumed { record, deleted })
            }
        }
    }

    async fn replace_if_idle(
        &self,
        record: OtpRecord,
        idle_since: DateTime<Utc>,
    ) -> Result<ReplaceOutcome, DomainError> {
        self.check_writable()?;
        let mut records = self.records.lock().await;

        if let Some(latest) =
            latest_where(&records, |r| r.verification_type == record.verification_type)
        {
            if latest.issued_at > idle_since {
                return Ok(ReplaceOutcome::Throttled {
                    latest_issued_at: latest.issued_at,
                });
            }
        }

        let before = records.len();
        records.retain(|r| r.verification_type != record.verification_type);
        let superseded = (before - records.len()) as u64;
        records.push(record);

        Ok(ReplaceOutcome::Replaced { superseded })
    }

    async fn delete_for(&self, verification_type: &str) -> Result<u64, DomainError> {
        self.check_writable()?;
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.verification_type != verification_type);
        Ok((before - records.len()) as u64)
    }

    async fn purge_issued_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_writable()?;
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|r| r.issued_at > cutoff);
        Ok((before - records.len()) as u64)
    }

    async fn count_for(&self, verification_type: &str) -> Result<u64, DomainError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|r| r.verification_type == verification_type)
            .count() as u64)
    }
}
