use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::crypto::generate_id;
use crate::repository::{Task, TaskPriority, TaskRepository, TaskStatus, TaskStatusCounts, TaskUpdate};
use crate::AuthError;

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TaskRecord {
    id: String,
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl From<TaskRecord> for Task {
    fn from(row: TaskRecord) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            // Unknown stored values fall back to the column defaults.
            priority: TaskPriority::parse(&row.priority).unwrap_or_default(),
            status: TaskStatus::parse(&row.status).unwrap_or(TaskStatus::Pending),
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        }
    }
}

const TASK_COLUMNS: &str = "id, title, description, priority, status, created_at, updated_at, completed_at";

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list(&self, limit: u32) -> Result<Vec<Task>, AuthError> {
        let rows: Vec<TaskRecord> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"list_tasks\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, description), err))]
    async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        priority: TaskPriority,
    ) -> Result<Task, AuthError> {
        let row: TaskRecord = sqlx::query_as(&format!(
            r"INSERT INTO tasks (id, title, description, priority, status, created_at)
               VALUES (?, ?, ?, ?, 'pending', ?)
               RETURNING {TASK_COLUMNS}"
        ))
        .bind(generate_id())
        .bind(title)
        .bind(description)
        .bind(priority.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"create_task\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, update), err))]
    async fn update(&self, id: &str, update: TaskUpdate) -> Result<(), AuthError> {
        let now = Utc::now();
        let status = update.status.map(TaskStatus::as_str);

        sqlx::query(
            r"UPDATE tasks SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                priority = COALESCE(?, priority),
                status = COALESCE(?, status),
                updated_at = ?,
                completed_at = CASE WHEN ? = 'completed' THEN ? ELSE completed_at END
               WHERE id = ?",
        )
        .bind(update.title)
        .bind(update.description)
        .bind(update.priority.map(TaskPriority::as_str))
        .bind(status)
        .bind(now)
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "anteroom", "msg=\"database error\" operation=\"update_task\" error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete(&self, id: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!(target: "anteroom", "msg=\"database error\" operation=\"delete_task\" error=\"{e}\"");
                AuthError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn status_counts(&self) -> Result<TaskStatusCounts, AuthError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM tasks GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    log::error!(target: "anteroom", "msg=\"database error\" operation=\"task_status_counts\" error=\"{e}\"");
                    AuthError::DatabaseError(e.to_string())
                })?;

        let mut counts = TaskStatusCounts::default();
        for (status, count) in rows {
            let count = count as u64;
            counts.total += count;
            match TaskStatus::parse(&status) {
                Some(TaskStatus::Pending) => counts.pending += count,
                Some(TaskStatus::Running) => counts.running += count,
                Some(TaskStatus::Completed) => counts.completed += count,
                Some(TaskStatus::Failed) => counts.failed += count,
                None => {}
            }
        }
        Ok(counts)
    }
}
