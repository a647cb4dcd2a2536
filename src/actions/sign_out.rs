use crate::{AuthError, SessionRepository};

/// Irrevocably invalidates one session.
pub struct SignOutAction<S> {
    session_repo: S,
}

impl<S: SessionRepository> SignOutAction<S> {
    pub fn new(session_repo: S) -> Self {
        SignOutAction { session_repo }
    }

    /// Delete-if-exists: an already-absent session (signed out twice,
    /// or a bogus token) still succeeds.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_out", skip_all, err)
    )]
    pub async fn execute(&self, token: &str) -> Result<(), AuthError> {
        self.session_repo.delete_by_token(token).await?;

        log::info!(target: "anteroom", "msg=\"sign-out\"");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::MockSessionRepository;

    #[tokio::test]
    async fn removes_the_session() {
        let sessions = MockSessionRepository::new();
        sessions
            .create("user-1", "tok-abc", Utc::now() + Duration::days(7))
            .await
            .unwrap();

        let signout = SignOutAction::new(sessions.clone());
        signout.execute("tok-abc").await.unwrap();

        assert!(sessions
            .find_valid("tok-abc", Utc::now())
            .await
            .unwrap()
            .is_none());
        assert_eq!(sessions.count(), 0);
    }

    #[tokio::test]
    async fn second_sign_out_is_a_silent_success() {
        let sessions = MockSessionRepository::new();
        sessions
            .create("user-1", "tok-abc", Utc::now() + Duration::days(7))
            .await
            .unwrap();

        let signout = SignOutAction::new(sessions);
        signout.execute("tok-abc").await.unwrap();
        assert!(signout.execute("tok-abc").await.is_ok());
    }

    #[tokio::test]
    async fn only_the_matching_session_is_removed() {
        let sessions = MockSessionRepository::new();
        let expiry = Utc::now() + Duration::days(7);
        sessions.create("user-1", "tok-a", expiry).await.unwrap();
        sessions.create("user-1", "tok-b", expiry).await.unwrap();

        let signout = SignOutAction::new(sessions.clone());
        signout.execute("tok-a").await.unwrap();

        assert!(sessions
            .find_valid("tok-b", Utc::now())
            .await
            .unwrap()
            .is_some());
    }
}
