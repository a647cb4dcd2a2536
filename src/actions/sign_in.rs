use crate::crypto::{generate_token, verify_password};
use crate::repository::PASSWORD_PROVIDER;
use crate::{
    AuthConfig, AuthError, CredentialRepository, SecretString, Session, SessionRepository, User,
    UserRepository,
};

/// Authenticates an existing identity by password and opens a new
/// session. Prior sessions for the user stay valid; concurrent
/// sessions are unbounded.
pub struct SignInAction<U, C, S> {
    user_repo: U,
    credential_repo: C,
    session_repo: S,
    config: AuthConfig,
}

impl<U, C, S> SignInAction<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: U, credential_repo: C, session_repo: S, config: AuthConfig) -> Self {
        SignInAction {
            user_repo,
            credential_repo,
            session_repo,
            config,
        }
    }

    /// Unknown email, missing credential row, and wrong password all
    /// yield the same `InvalidCredentials` so the boundary cannot be
    /// used to enumerate registered emails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_in", skip_all, err)
    )]
    pub async fn execute(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<(User, Session), AuthError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some(credential) = self
            .credential_repo
            .find_for_user(&user.id, PASSWORD_PROVIDER)
            .await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(
            password.expose_secret(),
            &credential.password_hash,
            &self.config.secret,
        ) {
            log::warn!(
                target: "anteroom",
                "msg=\"sign-in rejected\" user_id=\"{}\"",
                user.id
            );
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token();
        let expires_at = chrono::Utc::now() + self.config.session_lifetime;
        let session = self.session_repo.create(&user.id, &token, expires_at).await?;

        log::info!(
            target: "anteroom",
            "msg=\"sign-in success\" user_id=\"{}\"",
            user.id
        );

        Ok((user, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::SignUpAction;
    use crate::{MockCredentialRepository, MockSessionRepository, MockUserRepository};

    fn config() -> AuthConfig {
        AuthConfig::new(SecretString::new("unit-test-secret-of-sufficient-len!!"))
    }

    async fn seeded_repos() -> (
        MockUserRepository,
        MockCredentialRepository,
        MockSessionRepository,
    ) {
        let users = MockUserRepository::new();
        let credentials = MockCredentialRepository::new();
        let sessions = MockSessionRepository::new();

        let signup = SignUpAction::new(
            users.clone(),
            credentials.clone(),
            sessions.clone(),
            config(),
        );
        signup
            .execute("Ann", "ann@x.com", &SecretString::new("pw123"))
            .await
            .unwrap();

        (users, credentials, sessions)
    }

    #[tokio::test]
    async fn correct_password_opens_a_new_session() {
        let (users, credentials, sessions) = seeded_repos().await;
        let login = SignInAction::new(users, credentials, sessions.clone(), config());

        let (user, session) = login
            .execute("ann@x.com", &SecretString::new("pw123"))
            .await
            .unwrap();

        assert_eq!(user.email, "ann@x.com");
        assert_eq!(session.user_id, user.id);
        // Sign-up session plus the new one.
        assert_eq!(sessions.count(), 2);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let (users, credentials, sessions) = seeded_repos().await;
        let login = SignInAction::new(users, credentials, sessions, config());

        let unknown = login
            .execute("nobody@x.com", &SecretString::new("pw123"))
            .await
            .unwrap_err();
        let wrong = login
            .execute("ann@x.com", &SecretString::new("not-the-password"))
            .await
            .unwrap_err();

        assert_eq!(unknown, AuthError::InvalidCredentials);
        assert_eq!(wrong, AuthError::InvalidCredentials);
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn failed_sign_in_creates_no_session() {
        let (users, credentials, sessions) = seeded_repos().await;
        let login = SignInAction::new(users, credentials, sessions.clone(), config());

        let _ = login
            .execute("ann@x.com", &SecretString::new("not-the-password"))
            .await;

        assert_eq!(sessions.count(), 1);
    }

    #[tokio::test]
    async fn repeated_sign_ins_stack_sessions() {
        let (users, credentials, sessions) = seeded_repos().await;
        let login = SignInAction::new(users, credentials, sessions.clone(), config());

        for _ in 0..3 {
            login
                .execute("ann@x.com", &SecretString::new("pw123"))
                .await
                .unwrap();
        }

        // No cap and no replacement of earlier sessions.
        assert_eq!(sessions.count(), 4);
    }
}
