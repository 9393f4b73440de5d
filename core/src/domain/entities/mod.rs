//! Domain entities representing core business objects.

pub mod otp_record;

// Re-export commonly used types
pub use otp_record::{
    OtpRecord, CODE_LENGTH, RESEND_WINDOW_MINUTES, VALIDITY_WINDOW_MINUTES,
};
