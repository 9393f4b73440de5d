//! Delivery of issued codes over email or SMS

use std::sync::Arc;

use crate::domain::value_objects::{Contact, ContactKind};
use crate::errors::OtpError;

use super::config::OtpServiceConfig;
use super::traits::{EmailSenderTrait, SmsSenderTrait};

/// Proof that a message left the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub channel: ContactKind,
    pub message_id: String,
}

/// Routes a code to the channel its contact belongs to
pub struct DeliveryDispatcher<E: EmailSenderTrait, M: SmsSenderTrait> {
    email_sender: Arc<E>,
    sms_sender: Arc<M>,
    brand_name: String,
    validity_minutes: i64,
}

impl<E: EmailSenderTrait, M: SmsSenderTrait> DeliveryDispatcher<E, M> {
    pub fn new(email_sender: Arc<E>, sms_sender: Arc<M>, config: &OtpServiceConfig) -> Self {
        Self {
            email_sender,
            sms_sender,
            brand_name: config.brand_name.clone(),
            validity_minutes: config.validity_minutes,
        }
    }

    /// Classify a raw contact string
    pub fn classify(contact: &str) -> ContactKind {
        ContactKind::classify(contact.trim())
    }

    pub fn email_subject(&self) -> String {
        format!("Your {} verification code", self.brand_name)
    }

    pub fn email_body(&self, code: &str) -> String {
        format!(
            "Hello,\n\nYour {} verification code is {}.\n\n\
             The code expires in {} minutes. If you did not request it, you can ignore this email.\n",
            self.brand_name, code, self.validity_minutes
        )
    }

    pub fn sms_text(&self, code: &str) -> String {
        format!(
            "Your {} verification code is {}. It expires in {} minutes.",
            self.brand_name, code, self.validity_minutes
        )
    }

    /// Send `code` to `contact` over its channel
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryReceipt)` - The provider accepted the message
    /// * `Err(OtpError::DeliveryFailed)` - The provider refused or was unreachable
    pub async fn dispatch(&self, contact: &Contact, code: &str) -> Result<DeliveryReceipt, OtpError> {
        let channel = contact.kind();
        let sent = match channel {
            ContactKind::Email => {
                let recipients = [contact.as_str().to_string()];
                self.email_sender
                    .send_email(&self.email_subject(), &self.email_body(code), &recipients)
                    .await
            }
            ContactKind::Phone => {
                self.sms_sender
                    .send_sms(contact.sms_destination(), &self.sms_text(code))
                    .await
            }
            ContactKind::Invalid => {
                return Err(OtpError::InvalidContact {
                    contact: contact.as_str().to_string(),
                })
            }
        };

        sent.map(|message_id| DeliveryReceipt {
            channel,
            message_id,
        })
        .map_err(|reason| OtpError::DeliveryFailed {
            channel: channel.to_string(),
            reason,
        })
    }
}
