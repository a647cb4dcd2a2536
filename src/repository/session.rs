use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// One authenticated browser session. Valid iff the probe instant is
/// strictly before `expires_at`; the expiry is fixed at creation and
/// never extended by activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    /// The bearer token, stored verbatim. It is the sole credential
    /// needed to resolve the session.
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[async_trait]
pub trait SessionRepository {
    async fn create(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AuthError>;

    /// Looks up a session by token, filtered to rows whose expiry is
    /// strictly after `now`. Expired rows are simply unresolvable:
    /// nothing purges them, and this call must not mutate anything.
    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AuthError>;

    /// Deletes the session matching `token`. Succeeds silently when no
    /// row matches.
    async fn delete_by_token(&self, token: &str) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn validity_is_strict_expiry_comparison() {
        let now = Utc::now();
        let session = Session {
            id: "s1".to_owned(),
            user_id: "u1".to_owned(),
            token: "tok".to_owned(),
            expires_at: now + Duration::seconds(1),
            created_at: now,
        };

        assert!(session.is_valid_at(now));
        assert!(!session.is_valid_at(now + Duration::seconds(1)));
        assert!(!session.is_valid_at(now + Duration::seconds(2)));
    }
}
