use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A registered identity. Created exactly once at sign-up; this
/// subsystem never mutates or deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(any(test, feature = "mocks"))]
impl User {
    pub fn mock() -> Self {
        User {
            id: "user-1".to_owned(),
            name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            created_at: Utc::now(),
        }
    }

    pub fn mock_from_email(email: &str) -> Self {
        User {
            email: email.to_owned(),
            ..User::mock()
        }
    }
}

#[async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AuthError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
    async fn create(&self, name: &str, email: &str) -> Result<User, AuthError>;
}
