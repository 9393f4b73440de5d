//! User repository trait for the verification flags on user records.

use async_trait::async_trait;

use crate::domain::value_objects::Contact;
use crate::errors::DomainError;

/// Repository trait for the user-record collaborator
///
/// Only the part of the user record the verification workflow touches is
/// exposed here.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Mark the email or phone of the user owning `contact` as verified
    ///
    /// # Returns
    /// * `Ok(true)` - A user row was updated
    /// * `Ok(false)` - No user owns this contact
    /// * `Err(DomainError)` - Database or other error occurred
    async fn mark_contact_verified(&self, contact: &Contact) -> Result<bool, DomainError>;
}
