//! Unit tests for mock user repository

use crate::domain::value_objects::Contact;
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_mark_known_contact_verified() {
    let repo = MockUserRepository::new();
    repo.add_user("user@example.com").await;

    let contact = Contact::parse("user@example.com").unwrap();
    assert!(repo.mark_contact_verified(&contact).await.unwrap());
    assert_eq!(repo.verified().await, vec![contact]);
}

#[tokio::test]
async fn test_unknown_contact_is_not_marked() {
    let repo = MockUserRepository::new();

    let contact = Contact::parse("+2348012345678").unwrap();
    assert!(!repo.mark_contact_verified(&contact).await.unwrap());
    assert!(repo.verified().await.is_empty());
}
