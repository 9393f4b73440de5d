//! Periodic purge of expired OTP records
//!
//! Expired records are inert: verification rejects them on age alone. The
//! purge only keeps the table small.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::OtpStore;

use super::clock::{Clock, SystemClock};
use super::config::OtpCleanupConfig;

/// Service for deleting OTP records long past their validity window
pub struct OtpCleanupService<S: OtpStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: OtpCleanupConfig,
}

impl<S: OtpStore + 'static> OtpCleanupService<S> {
    /// Create a new cleanup service
    pub fn new(store: Arc<S>, config: OtpCleanupConfig) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run a single cleanup cycle
    ///
    /// Deletes every record issued at or before `now - (validity + grace)`.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = self.clock.now() - self.config.retention();
        let purged = self.store.purge_issued_before(cutoff).await?;

        if purged > 0 {
            info!(
                purged = purged,
                cutoff = %cutoff,
                event = "otp_cleanup",
                "Purged expired verification codes"
            );
        }

        Ok(CleanupResult { records_purged: purged })
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn spawn(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "OTP cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("OTP cleanup cycle failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired records deleted
    pub records_purged: u64,
}
