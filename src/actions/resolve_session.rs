use chrono::{DateTime, Utc};

use crate::{AuthError, Session, SessionRepository, User, UserRepository};

/// Resolves a bearer token to its user and session, if and only if the
/// session is currently valid.
///
/// Resolution is idempotent and side-effect-free: no expiry extension,
/// no row mutation. An unresolvable token is `Ok(None)`, the normal
/// anonymous-visitor outcome; store failures stay `Err`.
pub struct ResolveSessionAction<U, S> {
    user_repo: U,
    session_repo: S,
}

impl<U, S> ResolveSessionAction<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: U, session_repo: S) -> Self {
        ResolveSessionAction {
            user_repo,
            session_repo,
        }
    }

    pub async fn execute(&self, token: &str) -> Result<Option<(User, Session)>, AuthError> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolution against an explicit probe instant, so expiry
    /// behavior is testable without sleeping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "resolve_session", skip(self, token), err)
    )]
    pub async fn resolve_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<(User, Session)>, AuthError> {
        let Some(session) = self.session_repo.find_valid(token, now).await? else {
            return Ok(None);
        };

        // Join semantics: a session whose user row is missing does not
        // resolve.
        let Some(user) = self.user_repo.find_by_id(&session.user_id).await? else {
            return Ok(None);
        };

        Ok(Some((user, session)))
    }

    /// Guard variant: identity or `Unauthorized`, nothing in between.
    pub async fn require(&self, token: &str) -> Result<(User, Session), AuthError> {
        self.execute(token).await?.ok_or(AuthError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{MockSessionRepository, MockUserRepository};

    async fn seeded() -> (
        ResolveSessionAction<MockUserRepository, MockSessionRepository>,
        String,
        DateTime<Utc>,
    ) {
        let users = MockUserRepository::new();
        let sessions = MockSessionRepository::new();

        let user = users.create("Ann", "ann@x.com").await.unwrap();
        let now = Utc::now();
        let session = sessions
            .create(&user.id, "tok-abc", now + Duration::seconds(1))
            .await
            .unwrap();

        (
            ResolveSessionAction::new(users, sessions),
            session.token,
            now,
        )
    }

    #[tokio::test]
    async fn valid_token_resolves_user_and_session() {
        let (resolve, token, now) = seeded().await;

        let (user, session) = resolve.resolve_at(&token, now).await.unwrap().unwrap();
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(session.token, token);
        assert_eq!(session.user_id, user.id);
    }

    #[tokio::test]
    async fn expiry_boundary_is_strict() {
        let (resolve, token, now) = seeded().await;

        // One second before expiry: resolvable.
        assert!(resolve.resolve_at(&token, now).await.unwrap().is_some());
        // At and past the expiry instant: gone.
        let at_expiry = now + Duration::seconds(1);
        assert!(resolve
            .resolve_at(&token, at_expiry)
            .await
            .unwrap()
            .is_none());
        assert!(resolve
            .resolve_at(&token, at_expiry + Duration::days(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unknown_token_is_a_normal_absence() {
        let (resolve, _, now) = seeded().await;
        assert!(resolve
            .resolve_at("no-such-token", now)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn resolution_does_not_mutate_the_store() {
        let (resolve, token, now) = seeded().await;

        let first = resolve.resolve_at(&token, now).await.unwrap().unwrap();
        let second = resolve.resolve_at(&token, now).await.unwrap().unwrap();
        assert_eq!(first.1.expires_at, second.1.expires_at);
        assert_eq!(resolve.session_repo.count(), 1);
    }

    #[tokio::test]
    async fn require_maps_absence_to_unauthorized() {
        let (resolve, _, _) = seeded().await;
        let err = resolve.require("no-such-token").await.unwrap_err();
        assert_eq!(err, AuthError::Unauthorized);
    }
}
