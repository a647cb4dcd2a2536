use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::crypto::generate_id;
use crate::{AuthError, Session, SessionRepository};

#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRecord {
    id: String,
    user_id: String,
    token: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<SessionRecord> for Session {
    fn from(row: SessionRecord) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            token: row.token,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    async fn create(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let row: SessionRecord = sqlx::query_as(
            r"INSERT INTO session (id, user_id, token, expires_at, created_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id, user_id, token, expires_at, created_at",
        )
        .bind(generate_id())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"create_session\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AuthError> {
        let row: Option<SessionRecord> = sqlx::query_as(
            r"SELECT id, user_id, token, expires_at, created_at
               FROM session WHERE token = ? AND expires_at > ?",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"find_session\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    async fn delete_by_token(&self, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM session WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!(target: "anteroom", "msg=\"database error\" operation=\"delete_session\" error=\"{e}\"");
                AuthError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
