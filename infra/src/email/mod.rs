//! Email Service Module
//!
//! Email delivery for verification codes: an SMTP transport for real
//! delivery and a mock that prints messages during development.

pub mod adapter;
pub mod email_service;
pub mod mock_email;
pub mod smtp;

pub use adapter::EmailServiceAdapter;
pub use email_service::{EmailMessage, EmailService};
pub use mock_email::MockEmailService;
pub use smtp::SmtpEmailService;

use pp_shared::{EmailConfig, Environment};

use crate::InfrastructureError;

/// Create an email service based on configuration
///
/// Only development tolerates a missing transport: an unknown provider or a
/// failed SMTP setup falls back to the console mock there. Everywhere else it
/// is a startup error, and the mock never prints outside development.
pub fn create_email_service(
    config: &EmailConfig,
    environment: Environment,
) -> Result<Box<dyn EmailService>, InfrastructureError> {
    let console_mock = || Box::new(MockEmailService::with_options(true, false)) as Box<dyn EmailService>;

    match config.provider.as_str() {
        "mock" if environment.is_production() => Err(InfrastructureError::Config(
            "EMAIL_PROVIDER=mock cannot deliver codes in production".to_string(),
        )),
        "mock" if environment.is_development() => Ok(console_mock()),
        "mock" => Ok(Box::new(MockEmailService::with_options(false, false))),
        "smtp" => match SmtpEmailService::new(config) {
            Ok(service) => Ok(Box::new(service)),
            Err(e) if environment.is_development() => {
                tracing::error!("Failed to initialize SMTP email service: {}", e);
                tracing::warn!("Falling back to mock email service");
                Ok(console_mock())
            }
            Err(e) => Err(e),
        },
        other if environment.is_development() => {
            tracing::warn!(
                "Unknown email provider '{}', using mock implementation",
                other
            );
            Ok(console_mock())
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown email provider '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken_smtp() -> EmailConfig {
        EmailConfig {
            provider: "smtp".to_string(),
            from_address: "not an address".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_email_service_selects_provider() {
        let mock = create_email_service(&EmailConfig::default(), Environment::Development).unwrap();
        assert_eq!(mock.provider_name(), "Mock");

        let smtp = create_email_service(
            &EmailConfig {
                provider: "smtp".to_string(),
                ..Default::default()
            },
            Environment::Production,
        )
        .unwrap();
        assert_eq!(smtp.provider_name(), "SMTP");
    }

    #[tokio::test]
    async fn test_broken_smtp_falls_back_only_in_development() {
        let dev = create_email_service(&broken_smtp(), Environment::Development).unwrap();
        assert_eq!(dev.provider_name(), "Mock");

        for environment in [Environment::Staging, Environment::Production] {
            assert!(matches!(
                create_email_service(&broken_smtp(), environment),
                Err(InfrastructureError::Config(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_mock_and_unknown_providers_outside_development() {
        let unknown = EmailConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        assert!(create_email_service(&unknown, Environment::Development).is_ok());
        assert!(create_email_service(&unknown, Environment::Staging).is_err());

        assert!(create_email_service(&EmailConfig::default(), Environment::Staging).is_ok());
        assert!(create_email_service(&EmailConfig::default(), Environment::Production).is_err());
    }
}
