//! HTTP handlers for the dashboard API.
//!
//! Task creation is the queueing path: insert the row, answer the
//! caller, and dispatch to the gateway detached. A dispatch failure
//! is logged, never surfaced, and leaves the row pending.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::middleware::ApiAuth;
use super::routes::DashboardState;
use crate::api::axum::error::AppError;
use crate::api::{CreateTaskRequest, ErrorResponse, OkResponse, TaskListResponse, UpdateTaskRequest};
use crate::gateway::{GatewayError, GatewayStatus};
use crate::repository::{TaskPriority, TaskStatusCounts, TaskUpdate};
use crate::{SessionRepository, TaskRepository, UserRepository};

const TASK_LIST_LIMIT: u32 = 100;

fn gateway_failure(err: GatewayError) -> Response {
    log::error!(target: "anteroom::gateway", "msg=\"gateway call failed\" error=\"{err}\"");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// GET /tasks
pub async fn list_tasks<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    match state.task_repo.list(TASK_LIST_LIMIT).await {
        Ok(tasks) => Json(TaskListResponse { tasks }).into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

/// POST /tasks
///
/// Inserts a pending row, then queues it into the main agent session.
pub async fn create_task<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
    Json(body): Json<CreateTaskRequest>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    if body.title.trim().is_empty() || body.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Title and prompt required".to_owned(),
            }),
        )
            .into_response();
    }

    let task = match state
        .task_repo
        .create(&body.title, Some(&body.prompt), TaskPriority::default())
        .await
    {
        Ok(task) => task,
        Err(err) => return AppError(err).into_response(),
    };

    // Fire-and-forget: the response does not wait on the gateway.
    let gateway = state.gateway.clone();
    let (task_id, title, prompt) = (task.id.clone(), task.title.clone(), body.prompt);
    tokio::spawn(async move {
        if let Err(err) = gateway.queue_task(&task_id, &title, &prompt).await {
            log::error!(
                target: "anteroom::gateway",
                "msg=\"task dispatch failed\" task_id=\"{task_id}\" error=\"{err}\""
            );
        }
    });

    Json(task).into_response()
}

/// PUT /tasks/{id}
///
/// Partial update; this is also the agent's completion callback.
pub async fn update_task<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    let update = TaskUpdate {
        title: body.title,
        description: body.description,
        priority: body.priority,
        status: body.status,
    };

    match state.task_repo.update(&id, update).await {
        Ok(()) => Json(OkResponse { ok: true }).into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

/// DELETE /tasks/{id}
pub async fn delete_task<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
    Path(id): Path<String>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    match state.task_repo.delete(&id).await {
        Ok(()) => Json(OkResponse { ok: true }).into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

#[derive(Debug, Serialize)]
struct MetricsStatusResponse {
    gateway: GatewayStatus,
    tasks: TaskStatusCounts,
    timestamp: DateTime<Utc>,
}

/// GET /metrics/status
///
/// Gateway liveness plus task counts as the activity proxy. A failing
/// task store degrades to zero counts rather than failing the probe.
pub async fn metrics_status<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    let gateway = state.gateway.status().await;
    let tasks = state.task_repo.status_counts().await.unwrap_or_default();

    Json(MetricsStatusResponse {
        gateway,
        tasks,
        timestamp: Utc::now(),
    })
    .into_response()
}

#[derive(Debug, Serialize)]
struct CronJobsResponse {
    jobs: Vec<Value>,
}

/// GET /metrics/cron
pub async fn list_cron_jobs<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    let jobs = state.gateway.list_cron_jobs().await;
    Json(CronJobsResponse { jobs }).into_response()
}

/// POST /metrics/cron
pub async fn add_cron_job<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
    Json(body): Json<Value>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    match state.gateway.add_cron_job(&body).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => gateway_failure(err),
    }
}

/// DELETE /metrics/cron/{id}
pub async fn delete_cron_job<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
    Path(id): Path<String>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    match state.gateway.delete_cron_job(&id).await {
        Ok(()) => Json(OkResponse { ok: true }).into_response(),
        Err(err) => gateway_failure(err),
    }
}

/// POST /metrics/heartbeat
pub async fn heartbeat<U, S, K>(
    _auth: ApiAuth,
    State(state): State<DashboardState<U, S, K>>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    let instruction = "Trigger a heartbeat now. Run the cron wake tool with mode \"now\".";
    match state.gateway.send_to_main_session(instruction).await {
        Ok(()) => Json(OkResponse { ok: true }).into_response(),
        Err(err) => gateway_failure(err),
    }
}
