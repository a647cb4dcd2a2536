use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers;
use crate::gateway::GatewayClient;
use crate::{AuthConfig, SessionRepository, TaskRepository, UserRepository};

#[derive(Clone)]
pub struct DashboardState<U, S, K> {
    pub user_repo: U,
    pub session_repo: S,
    pub task_repo: K,
    pub config: AuthConfig,
    pub gateway: GatewayClient,
}

pub fn dashboard_routes<U, S, K>() -> Router<DashboardState<U, S, K>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<U, S, K>).post(handlers::create_task::<U, S, K>),
        )
        .route(
            "/tasks/{id}",
            put(handlers::update_task::<U, S, K>).delete(handlers::delete_task::<U, S, K>),
        )
        .route("/metrics/status", get(handlers::metrics_status::<U, S, K>))
        .route(
            "/metrics/cron",
            get(handlers::list_cron_jobs::<U, S, K>).post(handlers::add_cron_job::<U, S, K>),
        )
        .route(
            "/metrics/cron/{id}",
            delete(handlers::delete_cron_job::<U, S, K>),
        )
        .route("/metrics/heartbeat", post(handlers::heartbeat::<U, S, K>))
}
