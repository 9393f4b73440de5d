//! Main OTP workflow service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::{Contact, ContactKind};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::{ConsumeOutcome, OtpStore, ReplaceOutcome, UserRepository};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::dispatcher::DeliveryDispatcher;
use super::generator::{CodeGenerator, OsRngCodeGenerator};
use super::traits::{EmailSenderTrait, SmsSenderTrait};
use super::types::{SendCodeResult, VerifyCodeResult};

/// OTP service for issuing, resending, and verifying contact codes
pub struct OtpService<S, E, M, U>
where
    S: OtpStore,
    E: EmailSenderTrait,
    M: SmsSenderTrait,
    U: UserRepository,
{
    /// Record persistence
    store: Arc<S>,
    /// Email and SMS delivery
    dispatcher: DeliveryDispatcher<E, M>,
    /// User-record collaborator for the verified flags
    users: Arc<U>,
    clock: Arc<dyn Clock>,
    generator: Arc<dyn CodeGenerator>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S, E, M, U> OtpService<S, E, M, U>
where
    S: OtpStore,
    E: EmailSenderTrait,
    M: SmsSenderTrait,
    U: UserRepository,
{
    /// Create a new OTP service using the system clock and the OS CSPRNG
    ///
    /// # Arguments
    ///
    /// * `store` - OTP store implementation
    /// * `email_sender` - Email delivery implementation
    /// * `sms_sender` - SMS delivery implementation
    /// * `users` - User repository for the verified flags
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        email_sender: Arc<E>,
        sms_sender: Arc<M>,
        users: Arc<U>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            dispatcher: DeliveryDispatcher::new(email_sender, sms_sender, &config),
            users,
            clock: Arc::new(SystemClock),
            generator: Arc::new(OsRngCodeGenerator),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the code source
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Classify a raw contact string
    pub fn classify(&self, contact: &str) -> ContactKind {
        DeliveryDispatcher::<E, M>::classify(contact)
    }

    /// Issue a code to an email address or phone number
    ///
    /// This method:
    /// 1. Classifies the contact, failing before anything is generated
    /// 2. Generates a new code
    /// 3. Stores the record
    /// 4. Sends the code over the contact's channel
    ///
    /// The record is stored before dispatch, so a failed delivery leaves an
    /// unusable code that simply expires.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The stored record and delivery details
    /// * `Err(DomainError)` - Invalid contact, delivery failure, or store failure
    pub async fn send_code(&self, contact: &str) -> DomainResult<SendCodeResult> {
        let contact = self.parse_contact(contact)?;
        let now = self.clock.now();

        let record = OtpRecord::new(contact.as_str(), self.next_code(), now);
        let record = self.store.insert(record).await.map_err(|e| {
            tracing::error!(
                contact = %contact.masked(),
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        tracing::info!(
            contact = %contact.masked(),
            channel = %contact.kind(),
            record_id = %record.id,
            event = "otp_generated",
            "Generated new verification code"
        );

        self.deliver(&contact, record, now).await
    }

    /// Issue a fresh code unless one was issued inside the resend window
    ///
    /// A permitted resend removes every earlier record for the contact, so
    /// superseded codes never verify again.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The new record and delivery details
    /// * `Err(DomainError)` - Invalid contact, throttled, delivery failure, or store failure
    pub async fn resend(&self, contact: &str) -> DomainResult<SendCodeResult> {
        let contact = self.parse_contact(contact)?;
        let now = self.clock.now();
        let idle_since = now - self.config.resend_window();

        // Refuse early so a throttled request never generates a code
        if let Some(latest) = self.store.find_latest(contact.as_str()).await? {
            if latest.issued_at > idle_since {
                return Err(self.throttled(&contact, latest.issued_at, now).into());
            }
        }

        let record = OtpRecord::new(contact.as_str(), self.next_code(), now);
        match self.store.replace_if_idle(record.clone(), idle_since).await? {
            ReplaceOutcome::Throttled { latest_issued_at } => {
                Err(self.throttled(&contact, latest_issued_at, now).into())
            }
            ReplaceOutcome::Replaced { superseded } => {
                tracing::info!(
                    contact = %contact.masked(),
                    channel = %contact.kind(),
                    record_id = %record.id,
                    superseded = superseded,
                    event = "otp_resent",
                    "Replaced verification code"
                );
                self.deliver(&contact, record, now).await
            }
        }
    }

    /// Verify a submitted code for a contact
    ///
    /// Lookup and deletion happen in one store operation, so two concurrent
    /// calls with the same code never both succeed. A wrong code and an
    /// expired code fail the same way.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - The code was fresh and is now consumed
    /// * `Err(DomainError::Otp(OtpError::InvalidOrExpired))` - No usable code matched
    /// * `Err(DomainError)` - Store failure
    pub async fn verify(&self, contact: &str, code: &str) -> DomainResult<VerifyCodeResult> {
        let contact = match Contact::parse(contact) {
            Ok(contact) => contact,
            Err(_) => {
                tracing::warn!(
                    event = "otp_verify_invalid_contact",
                    "Verification for unclassifiable contact"
                );
                return Err(OtpError::InvalidOrExpired.into());
            }
        };

        let code = code.trim();
        if code.len() != self.config.code_length || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                contact = %contact.masked(),
                code_length = code.len(),
                event = "invalid_code_format",
                "Invalid verification code format provided"
            );
            return Err(OtpError::InvalidOrExpired.into());
        }

        let now = self.clock.now();
        let issued_after = now - self.config.validity();

        match self.store.consume(contact.as_str(), code, issued_after).await? {
            ConsumeOutcome::Consumed { record, deleted } => {
                tracing::info!(
                    contact = %contact.masked(),
                    record_id = %record.id,
                    deleted = deleted,
                    event = "otp_verified_success",
                    "Verification code successfully verified"
                );

                let user_marked = match self.users.mark_contact_verified(&contact).await {
                    Ok(marked) => marked,
                    Err(e) => {
                        tracing::error!(
                            contact = %contact.masked(),
                            error = %e,
                            event = "user_flag_update_failed",
                            "Code consumed but user record was not updated"
                        );
                        false
                    }
                };

                Ok(VerifyCodeResult {
                    contact,
                    user_marked,
                    codes_deleted: deleted,
                })
            }
            ConsumeOutcome::Expired { issued_at } => {
                tracing::warn!(
                    contact = %contact.masked(),
                    age_secs = (now - issued_at).num_seconds(),
                    event = "otp_expired",
                    "Verification code expired"
                );
                Err(OtpError::InvalidOrExpired.into())
            }
            ConsumeOutcome::NotFound => {
                tracing::warn!(
                    contact = %contact.masked(),
                    event = "otp_verification_failed",
                    "No matching verification code"
                );
                Err(OtpError::InvalidOrExpired.into())
            }
        }
    }

    /// Verify an integer code, zero-padding it to the configured length
    ///
    /// `42` verifies against the stored code `"000042"`.
    pub async fn verify_numeric(&self, contact: &str, code: u32) -> DomainResult<VerifyCodeResult> {
        let width = self.config.code_length;
        let padded = format!("{:0width$}", code, width = width);
        self.verify(contact, &padded).await
    }

    fn parse_contact(&self, raw: &str) -> Result<Contact, OtpError> {
        Contact::parse(raw).map_err(|e| {
            tracing::warn!(
                contact = %pp_shared::masking::mask_contact(raw.trim()),
                event = "invalid_contact",
                "Contact is neither an email address nor a phone number"
            );
            e
        })
    }

    fn next_code(&self) -> String {
        self.generator.generate(self.config.code_length)
    }

    fn throttled(&self, contact: &Contact, latest: DateTime<Utc>, now: DateTime<Utc>) -> OtpError {
        let retry_after_secs = (latest + self.config.resend_window() - now)
            .num_seconds()
            .max(1);
        tracing::warn!(
            contact = %contact.masked(),
            retry_after_secs = retry_after_secs,
            event = "otp_resend_throttled",
            "Resend requested inside the resend window"
        );
        OtpError::Throttled { retry_after_secs }
    }

    async fn deliver(
        &self,
        contact: &Contact,
        record: OtpRecord,
        now: DateTime<Utc>,
    ) -> DomainResult<SendCodeResult> {
        let receipt = self.dispatcher.dispatch(contact, &record.code).await.map_err(|e| {
            tracing::error!(
                contact = %contact.masked(),
                channel = %contact.kind(),
                error = %e,
                event = "otp_delivery_failed",
                "Failed to deliver verification code"
            );
            e
        })?;

        tracing::info!(
            contact = %contact.masked(),
            channel = %receipt.channel,
            message_id = %receipt.message_id,
            event = "otp_sent",
            "Verification code delivered"
        );

        Ok(SendCodeResult {
            next_resend_at: now + self.config.resend_window(),
            record,
            channel: receipt.channel,
            message_id: receipt.message_id,
        })
    }
}
