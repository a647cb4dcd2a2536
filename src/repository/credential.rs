use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;

/// Provider tag for password credentials. The only provider this
/// service issues; the column exists so other providers could share
/// the table.
pub const PASSWORD_PROVIDER: &str = "credential";

/// Stored password material for one user under one provider. Exactly
/// one row per (user, provider); never rotated, since there is no
/// password-change path.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: String,
    pub user_id: String,
    pub provider_id: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait CredentialRepository {
    async fn find_for_user(
        &self,
        user_id: &str,
        provider_id: &str,
    ) -> Result<Option<Credential>, AuthError>;

    async fn create(
        &self,
        user_id: &str,
        provider_id: &str,
        password_hash: &str,
    ) -> Result<Credential, AuthError>;
}
