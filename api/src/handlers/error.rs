//! Maps domain errors onto HTTP responses
//!
//! Every failure answers `{"success": false, "error": "..."}`. Wrong and
//! expired codes share one message.

use actix_web::{http::StatusCode, HttpResponse};
use pp_core::errors::{DomainError, OtpError};
use pp_shared::ApiResponse;

pub const INVALID_CONTACT_MESSAGE: &str = "Invalid email or phone number.";
pub const THROTTLED_MESSAGE: &str = "Cannot resend OTP, try again later.";
pub const INVALID_OR_EXPIRED_MESSAGE: &str = "Invalid or expired OTP.";
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to deliver OTP, please try again later.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Otp(otp) => match otp {
            OtpError::InvalidContact { .. }
            | OtpError::Throttled { .. }
            | OtpError::InvalidOrExpired => StatusCode::BAD_REQUEST,
            OtpError::DeliveryFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        },
    }
}

/// User-facing message for a domain error
///
/// Internal details never leave the process.
pub fn user_message(error: &DomainError) -> String {
    match error {
        DomainError::Validation { message } => message.clone(),
        DomainError::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        DomainError::Otp(otp) => match otp {
            OtpError::InvalidContact { .. } => INVALID_CONTACT_MESSAGE,
            OtpError::Throttled { .. } => THROTTLED_MESSAGE,
            OtpError::InvalidOrExpired => INVALID_OR_EXPIRED_MESSAGE,
            OtpError::DeliveryFailed { .. } => DELIVERY_FAILED_MESSAGE,
        }
        .to_string(),
    }
}

/// Build the failure response for a domain error
pub fn error_response(error: &DomainError) -> HttpResponse {
    let mut builder = HttpResponse::build(status_for(error));

    if let DomainError::Otp(OtpError::Throttled { retry_after_secs }) = error {
        builder.insert_header(("Retry-After", retry_after_secs.to_string()));
    }

    builder.json(ApiResponse::error(user_message(error)))
}
