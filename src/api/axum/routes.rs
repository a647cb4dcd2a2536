use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::{AuthConfig, CredentialRepository, SessionRepository, UserRepository};

#[derive(Clone)]
pub struct AppState<U, C, S> {
    pub user_repo: U,
    pub credential_repo: C,
    pub session_repo: S,
    pub config: AuthConfig,
}

/// The authentication surface. One explicit route per operation, so
/// an unhandled operation is a missing route here rather than a
/// string-match fallthrough.
pub fn auth_routes<U, C, S>() -> Router<AppState<U, C, S>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: CredentialRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/sign-up/email", post(handlers::sign_up::<U, C, S>))
        .route("/sign-in/email", post(handlers::sign_in::<U, C, S>))
        .route("/sign-out", post(handlers::sign_out::<U, C, S>))
        .route("/get-session", get(handlers::get_session::<U, C, S>))
}
