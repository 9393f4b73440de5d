//! In-memory user records holding only the verification flags

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use pp_core::domain::value_objects::{Contact, ContactKind};
use pp_core::errors::DomainError;
use pp_core::repositories::UserRepository;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationFlags {
    pub email_verified: bool,
    pub phone_verified: bool,
}

/// Process-local stand-in for the users table
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, VerificationFlags>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user owning `contact`
    pub async fn register(&self, contact: &str) {
        self.users
            .write()
            .await
            .entry(contact.to_string())
            .or_default();
    }

    /// Flags for the user owning `contact`, if any
    pub async fn flags(&self, contact: &str) -> Option<VerificationFlags> {
        self.users.read().await.get(contact).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn mark_contact_verified(&self, contact: &Contact) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let Some(flags) = users.get_mut(contact.as_str()) else {
            return Ok(false);
        };

        match contact.kind() {
            ContactKind::Email => flags.email_verified = true,
            ContactKind::Phone => flags.phone_verified = true,
            ContactKind::Invalid => return Ok(false),
        }
        Ok(true)
    }
}
