//! Value objects representing immutable domain concepts.

pub mod contact;

// Re-export commonly used types
pub use contact::{Contact, ContactKind};
