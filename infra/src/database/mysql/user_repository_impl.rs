//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use pp_core::domain::value_objects::{Contact, ContactKind};
use pp_core::errors::DomainError;
use pp_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn mark_contact_verified(&self, contact: &Contact) -> Result<bool, DomainError> {
        let query = match contact.kind() {
            ContactKind::Email => {
                r#"
                UPDATE users
                SET email_verified = TRUE, updated_at = CURRENT_TIMESTAMP(6)
                WHERE email = ?
                "#
            }
            ContactKind::Phone => {
                r#"
                UPDATE users
                SET phone_verified = TRUE, updated_at = CURRENT_TIMESTAMP(6)
                WHERE phone = ?
                "#
            }
            ContactKind::Invalid => return Ok(false),
        };

        let result = sqlx::query(query)
            .bind(contact.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to mark contact verified: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
