#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::session::{Session, SessionRepository};
use crate::crypto::generate_id;
use crate::AuthError;

#[derive(Clone, Default)]
pub struct MockSessionRepository {
    pub sessions: Arc<Mutex<Vec<Session>>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let session = Session {
            id: generate_id(),
            user_id: user_id.to_owned(),
            token: token.to_owned(),
            expires_at,
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.lock().unwrap();
        sessions.push(session.clone());
        drop(sessions);

        Ok(session)
    }

    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AuthError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .find(|s| s.token == token && s.is_valid_at(now))
            .cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AuthError> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|s| s.token != token);
        drop(sessions);
        Ok(())
    }
}
