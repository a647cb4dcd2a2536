use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::crypto::generate_id;
use crate::{AuthError, Credential, CredentialRepository};

#[derive(Clone)]
pub struct SqliteCredentialRepository {
    pool: SqlitePool,
}

impl SqliteCredentialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRecord {
    id: String,
    user_id: String,
    provider_id: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<CredentialRecord> for Credential {
    fn from(row: CredentialRecord) -> Self {
        Credential {
            id: row.id,
            user_id: row.user_id,
            provider_id: row.provider_id,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CredentialRepository for SqliteCredentialRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_for_user(
        &self,
        user_id: &str,
        provider_id: &str,
    ) -> Result<Option<Credential>, AuthError> {
        let row: Option<CredentialRecord> = sqlx::query_as(
            "SELECT id, user_id, provider_id, password_hash, created_at FROM account WHERE user_id = ? AND provider_id = ?",
        )
        .bind(user_id)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"find_credential\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    async fn create(
        &self,
        user_id: &str,
        provider_id: &str,
        password_hash: &str,
    ) -> Result<Credential, AuthError> {
        let row: CredentialRecord = sqlx::query_as(
            r"INSERT INTO account (id, user_id, provider_id, password_hash, created_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id, user_id, provider_id, password_hash, created_at",
        )
        .bind(generate_id())
        .bind(user_id)
        .bind(provider_id)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"create_credential\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
