pub mod otp;
pub mod user;

pub use otp::{ConsumeOutcome, OtpStore, ReplaceOutcome};
pub use user::UserRepository;

#[cfg(test)]
pub use otp::MockOtpStore;
#[cfg(test)]
pub use user::MockUserRepository;
