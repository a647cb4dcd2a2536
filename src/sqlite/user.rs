use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::crypto::generate_id;
use crate::{AuthError, User, UserRepository};

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: String,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(row: UserRecord) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AuthError> {
        let row: Option<UserRecord> =
            sqlx::query_as("SELECT id, name, email, created_at FROM user WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    log::error!(target: "anteroom", "msg=\"database error\" operation=\"find_user_by_id\" error=\"{e}\"");
                    AuthError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, email), err))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row: Option<UserRecord> =
            sqlx::query_as("SELECT id, name, email, created_at FROM user WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    log::error!(target: "anteroom", "msg=\"database error\" operation=\"find_user_by_email\" error=\"{e}\"");
                    AuthError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, name, email), err))]
    async fn create(&self, name: &str, email: &str) -> Result<User, AuthError> {
        let row: UserRecord = sqlx::query_as(
            "INSERT INTO user (id, name, email, created_at) VALUES (?, ?, ?, ?) RETURNING id, name, email, created_at",
        )
        .bind(generate_id())
        .bind(name)
        .bind(email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The UNIQUE email constraint catches the sign-up race the
            // pre-insert lookup cannot.
            if let sqlx::Error::Database(ref db) = e {
                if db.is_unique_violation() {
                    return AuthError::UserAlreadyExists;
                }
            }
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"create_user\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }
}
