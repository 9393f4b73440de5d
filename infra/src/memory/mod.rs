//! Process-local implementations of the core persistence traits.
//!
//! Used when `STORE_BACKEND=memory` and by tests that exercise the HTTP
//! layer without a database. State is lost on restart.

pub mod otp_store;
pub mod user_repository;

pub use otp_store::InMemoryOtpStore;
pub use user_repository::InMemoryUserRepository;
