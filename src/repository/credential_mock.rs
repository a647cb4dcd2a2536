#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::credential::{Credential, CredentialRepository};
use crate::crypto::generate_id;
use crate::AuthError;

#[derive(Clone, Default)]
pub struct MockCredentialRepository {
    pub credentials: Arc<Mutex<Vec<Credential>>>,
}

impl MockCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.credentials.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialRepository for MockCredentialRepository {
    async fn find_for_user(
        &self,
        user_id: &str,
        provider_id: &str,
    ) -> Result<Option<Credential>, AuthError> {
        let credentials = self.credentials.lock().unwrap();
        Ok(credentials
            .iter()
            .find(|c| c.user_id == user_id && c.provider_id == provider_id)
            .cloned())
    }

    async fn create(
        &self,
        user_id: &str,
        provider_id: &str,
        password_hash: &str,
    ) -> Result<Credential, AuthError> {
        let credential = Credential {
            id: generate_id(),
            user_id: user_id.to_owned(),
            provider_id: provider_id.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        };

        let mut credentials = self.credentials.lock().unwrap();
        credentials.push(credential.clone());
        drop(credentials);

        Ok(credential)
    }
}
