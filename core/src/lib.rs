//! # PayProtect Core
//!
//! Core business logic and domain layer for the PayProtect contact
//! verification service. This crate contains the OTP record entity, contact
//! classification, repository interfaces, the OTP workflow services, and the
//! error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
