//! OTP service module for email and phone contact verification
//!
//! This module provides the complete one-time passcode workflow:
//! - Code generation from a cryptographically secure source
//! - Delivery over email or SMS depending on the contact
//! - Verification with single-use consumption
//! - Resend throttling per contact
//! - Periodic purge of expired records

mod cleanup;
mod clock;
mod config;
mod dispatcher;
mod generator;
mod service;
mod traits;
mod types;


pub use cleanup::{CleanupResult, OtpCleanupService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{OtpCleanupConfig, OtpServiceConfig};
pub use dispatcher::{DeliveryDispatcher, DeliveryReceipt};
pub use generator::{generate_code, CodeGenerator, OsRngCodeGenerator, SeededCodeGenerator};
pub use service::OtpService;
pub use traits::{EmailSenderTrait, SmsSenderTrait};
pub use types::{SendCodeResult, VerifyCodeResult};
