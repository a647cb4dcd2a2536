use crate::crypto::{generate_token, hash_password};
use crate::repository::PASSWORD_PROVIDER;
use crate::{
    AuthConfig, AuthError, CredentialRepository, SecretString, Session, SessionRepository, User,
    UserRepository,
};

/// Registers a new identity and immediately establishes a session.
pub struct SignUpAction<U, C, S> {
    user_repo: U,
    credential_repo: C,
    session_repo: S,
    config: AuthConfig,
}

impl<U, C, S> SignUpAction<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: U, credential_repo: C, session_repo: S, config: AuthConfig) -> Self {
        SignUpAction {
            user_repo,
            credential_repo,
            session_repo,
            config,
        }
    }

    /// Creates the user, its password credential, and a first session.
    ///
    /// The duplicate check and the three inserts are not wrapped in a
    /// transaction; a failure between inserts can strand a user row
    /// without credential or session. The store's unique email
    /// constraint turns the lost race between concurrent sign-ups into
    /// `UserAlreadyExists` rather than a second row.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_up", skip_all, err)
    )]
    pub async fn execute(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(User, Session), AuthError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let hashed = hash_password(password.expose_secret(), &self.config.secret);

        let user = self.user_repo.create(name, email).await?;
        self.credential_repo
            .create(&user.id, PASSWORD_PROVIDER, &hashed)
            .await?;

        let token = generate_token();
        let expires_at = chrono::Utc::now() + self.config.session_lifetime;
        let session = self.session_repo.create(&user.id, &token, expires_at).await?;

        log::info!(
            target: "anteroom",
            "msg=\"sign-up success\" user_id=\"{}\"",
            user.id
        );

        Ok((user, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockCredentialRepository, MockSessionRepository, MockUserRepository};

    fn config() -> AuthConfig {
        AuthConfig::new(SecretString::new("unit-test-secret-of-sufficient-len!!"))
    }

    fn action() -> SignUpAction<MockUserRepository, MockCredentialRepository, MockSessionRepository>
    {
        SignUpAction::new(
            MockUserRepository::new(),
            MockCredentialRepository::new(),
            MockSessionRepository::new(),
            config(),
        )
    }

    #[tokio::test]
    async fn creates_user_credential_and_session() {
        let signup = action();

        let (user, session) = signup
            .execute("Ann", "ann@x.com", &SecretString::new("pw123"))
            .await
            .unwrap();

        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(session.user_id, user.id);
        assert!(!session.token.is_empty());
        assert!(session.expires_at > session.created_at);

        assert_eq!(signup.user_repo.count(), 1);
        assert_eq!(signup.credential_repo.count(), 1);
        assert_eq!(signup.session_repo.count(), 1);
    }

    #[tokio::test]
    async fn stores_a_digest_not_the_password() {
        let signup = action();
        let (user, _) = signup
            .execute("Ann", "ann@x.com", &SecretString::new("pw123"))
            .await
            .unwrap();

        let credentials = signup.credential_repo.credentials.lock().unwrap();
        let stored = &credentials[0];
        assert_eq!(stored.user_id, user.id);
        assert_eq!(stored.provider_id, PASSWORD_PROVIDER);
        assert_ne!(stored.password_hash, "pw123");
    }

    #[tokio::test]
    async fn duplicate_email_fails_without_new_rows() {
        let signup = action();
        signup
            .execute("Ann", "ann@x.com", &SecretString::new("pw123"))
            .await
            .unwrap();

        let result = signup
            .execute("Other Ann", "ann@x.com", &SecretString::new("different"))
            .await;

        assert_eq!(result.unwrap_err(), AuthError::UserAlreadyExists);
        assert_eq!(signup.user_repo.count(), 1);
        assert_eq!(signup.credential_repo.count(), 1);
        assert_eq!(signup.session_repo.count(), 1);
    }

    #[tokio::test]
    async fn session_lifetime_comes_from_config() {
        let mut cfg = config();
        cfg.session_lifetime = chrono::Duration::days(7);
        let signup = SignUpAction::new(
            MockUserRepository::new(),
            MockCredentialRepository::new(),
            MockSessionRepository::new(),
            cfg,
        );

        let before = chrono::Utc::now();
        let (_, session) = signup
            .execute("Ann", "ann@x.com", &SecretString::new("pw123"))
            .await
            .unwrap();

        let lower = before + chrono::Duration::days(7) - chrono::Duration::seconds(5);
        let upper = chrono::Utc::now() + chrono::Duration::days(7);
        assert!(session.expires_at >= lower && session.expires_at <= upper);
    }
}
