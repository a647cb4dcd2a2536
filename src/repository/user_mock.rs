#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::user::{User, UserRepository};
use crate::crypto::generate_id;
use crate::AuthError;

#[derive(Clone, Default)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, name: &str, email: &str) -> Result<User, AuthError> {
        let user = User {
            id: generate_id(),
            name: name.to_owned(),
            email: email.to_owned(),
            created_at: Utc::now(),
        };

        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }
        users.push(user.clone());
        drop(users);

        Ok(user)
    }
}
