#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::task::{Task, TaskPriority, TaskRepository, TaskStatus, TaskStatusCounts, TaskUpdate};
use crate::crypto::generate_id;
use crate::AuthError;

#[derive(Clone, Default)]
pub struct MockTaskRepository {
    pub tasks: Arc<Mutex<Vec<Task>>>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn list(&self, limit: u32) -> Result<Vec<Task>, AuthError> {
        let tasks = self.tasks.lock().unwrap();
        let mut listed: Vec<Task> = tasks.clone();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listed.truncate(limit as usize);
        Ok(listed)
    }

    async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        priority: TaskPriority,
    ) -> Result<Task, AuthError> {
        let task = Task {
            id: generate_id(),
            title: title.to_owned(),
            description: description.map(ToOwned::to_owned),
            priority,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
            completed_at: None,
        };

        let mut tasks = self.tasks.lock().unwrap();
        tasks.push(task.clone());
        drop(tasks);

        Ok(task)
    }

    async fn update(&self, id: &str, update: TaskUpdate) -> Result<(), AuthError> {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            if let Some(title) = update.title {
                task.title = title;
            }
            if let Some(description) = update.description {
                task.description = Some(description);
            }
            if let Some(priority) = update.priority {
                task.priority = priority;
            }
            if let Some(status) = update.status {
                task.status = status;
                if status == TaskStatus::Completed {
                    task.completed_at = Some(Utc::now());
                }
            }
            task.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AuthError> {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.retain(|t| t.id != id);
        drop(tasks);
        Ok(())
    }

    async fn status_counts(&self) -> Result<TaskStatusCounts, AuthError> {
        let tasks = self.tasks.lock().unwrap();
        let mut counts = TaskStatusCounts::default();
        for task in tasks.iter() {
            counts.total += 1;
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::Running => counts.running += 1,
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Failed => counts.failed += 1,
            }
        }
        Ok(counts)
    }
}
