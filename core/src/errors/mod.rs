//! Domain-specific error types and error handling.

mod types;

pub use types::OtpError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to workflow errors
    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl DomainError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Otp(err) => err.error_code(),
        }
    }

    /// Whether the caller can fix the request and try again
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Validation { .. } => true,
            DomainError::Internal { .. } => false,
            DomainError::Otp(OtpError::DeliveryFailed { .. }) => false,
            DomainError::Otp(_) => true,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
