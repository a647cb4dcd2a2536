use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TaskStatus::Pending),
            "running" => Some(TaskStatus::Running),
            "completed" => Some(TaskStatus::Completed),
            "failed" => Some(TaskStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// One dashboard task row. The agent picks work up through the gateway
/// and reports progress back by updating `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

/// Per-status row counts for the dashboard metrics panel.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TaskStatusCounts {
    pub total: u64,
    pub pending: u64,
    pub running: u64,
    pub completed: u64,
    pub failed: u64,
}

#[async_trait]
pub trait TaskRepository {
    /// Newest-first listing, capped at `limit` rows.
    async fn list(&self, limit: u32) -> Result<Vec<Task>, AuthError>;

    /// Inserts a new task in `Pending` status.
    async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        priority: TaskPriority,
    ) -> Result<Task, AuthError>;

    /// Applies a partial update. Setting status to `Completed` stamps
    /// `completed_at`. A missing id is not an error; the update just
    /// touches zero rows.
    async fn update(&self, id: &str, update: TaskUpdate) -> Result<(), AuthError>;

    /// Delete-if-exists.
    async fn delete(&self, id: &str) -> Result<(), AuthError>;

    async fn status_counts(&self) -> Result<TaskStatusCounts, AuthError>;
}
