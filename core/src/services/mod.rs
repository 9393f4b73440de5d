//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Clock, CodeGenerator, DeliveryDispatcher, EmailSenderTrait, ManualClock, OsRngCodeGenerator,
    OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig, SeededCodeGenerator,
    SendCodeResult, SmsSenderTrait, SystemClock, VerifyCodeResult,
};
