//! OTP route handlers
//!
//! - `POST /api/v1/otp/send-code`
//! - `POST /api/v1/otp/resend-code`
//! - `POST /api/v1/otp/verify-code`

pub mod resend_code;
pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use pp_core::repositories::{OtpStore, UserRepository};
use pp_core::services::otp::{EmailSenderTrait, OtpService, SmsSenderTrait};

pub use resend_code::resend_code;
pub use send_code::send_code;
pub use verify_code::verify_code;

pub const SENT_MESSAGE: &str = "OTP sent successfully.";
pub const RESENT_MESSAGE: &str = "OTP resent successfully.";
pub const EMAIL_VERIFIED_MESSAGE: &str = "Email verified successfully.";
pub const PHONE_VERIFIED_MESSAGE: &str = "Phone number verified successfully.";

/// Application state that holds shared services
pub struct AppState<S, E, M, U>
where
    S: OtpStore,
    E: EmailSenderTrait,
    M: SmsSenderTrait,
    U: UserRepository,
{
    pub otp_service: Arc<OtpService<S, E, M, U>>,
}

impl<S, E, M, U> AppState<S, E, M, U>
where
    S: OtpStore,
    E: EmailSenderTrait,
    M: SmsSenderTrait,
    U: UserRepository,
{
    pub fn new(otp_service: Arc<OtpService<S, E, M, U>>) -> Self {
        Self { otp_service }
    }
}
