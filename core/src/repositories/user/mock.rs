//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::value_objects::Contact;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Clone, Default)]
pub struct MockUserRepository {
    known: Arc<RwLock<HashSet<String>>>,
    verified: Arc<RwLock<Vec<Contact>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contact as belonging to an existing user
    pub async fn add_user(&self, contact: &str) {
        self.known.write().await.insert(contact.to_string());
    }

    /// Contacts marked verified so far, in call order
    pub async fn verified(&self) -> Vec<Contact> {
        self.verified.read().await.clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn mark_contact_verified(&self, contact: &Contact) -> Result<bool, DomainError> {
        if !self.known.read().await.contains(contact.as_str()) {
            return Ok(false);
        }
        self.verified.write().await.push(contact.clone());
        Ok(true)
    }
}
