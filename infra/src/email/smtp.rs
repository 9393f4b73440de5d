//! SMTP email delivery over lettre's async tokio transport

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use pp_shared::masking::mask_email;
use pp_shared::EmailConfig;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Implicit-TLS submission port; every other port negotiates STARTTLS
const SMTPS_PORT: u16 = 465;

/// SMTP email service
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Domain used when minting Message-ID headers
    id_domain: String,
}

impl SmtpEmailService {
    /// Build the transport from configuration
    ///
    /// `localhost` relays are reached without TLS, which is what local
    /// catch-all servers such as MailHog expect.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let builder = if config.smtp_host == "localhost" || config.smtp_host == "127.0.0.1" {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        } else if config.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid EMAIL_FROM: {}", e)))?;

        info!(
            "SMTP email service initialized for {}:{}",
            config.smtp_host, config.smtp_port
        );

        Ok(Self {
            transport: builder.build(),
            id_domain: from.email.domain().to_string(),
        })
    }

    fn build_message(&self, message: &EmailMessage, message_id: &str) -> Result<Message, InfrastructureError> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid sender address: {}", e)))?;

        let mut builder = Message::builder()
            .from(from)
            .subject(message.subject.as_str())
            .message_id(Some(message_id.to_string()))
            .header(ContentType::TEXT_PLAIN);

        for recipient in &message.recipients {
            let to: Mailbox = recipient.parse().map_err(|e| {
                InfrastructureError::Email(format!(
                    "Invalid recipient {}: {}",
                    mask_email(recipient),
                    e
                ))
            })?;
            builder = builder.to(to);
        }

        builder
            .body(message.body.clone())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if message.recipients.is_empty() {
            return Err(InfrastructureError::Email("No recipients".to_string()));
        }

        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.id_domain);
        let email = self.build_message(message, &message_id)?;

        self.transport.send(email).await.map_err(|e| {
            error!("SMTP delivery failed: {}", e);
            InfrastructureError::Email(format!("SMTP delivery failed: {}", e))
        })?;

        info!(
            target: "email_service",
            provider = "smtp",
            recipients = message.recipients.len(),
            message_id = %message_id,
            "Email sent successfully"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}
