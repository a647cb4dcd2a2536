use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::routes::DashboardState;
use crate::actions::ResolveSessionAction;
use crate::api::axum::error::AppError;
use crate::api::axum::middleware::{extract_bearer_token, extract_cookie_token};
use crate::{AuthError, SessionRepository, TaskRepository, UserRepository};

/// Machine-to-machine guard: the configured bearer secret OR a valid
/// cookie session, either one is full proof. Binary trust: no scoping
/// between the two credential kinds, and no identity carried out.
#[derive(Debug, Clone, Copy)]
pub struct ApiAuth;

impl<U, S, K> FromRequestParts<DashboardState<U, S, K>> for ApiAuth
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: TaskRepository + Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &DashboardState<U, S, K>,
    ) -> Result<Self, Self::Rejection> {
        if let (Some(bearer), Some(expected)) =
            (extract_bearer_token(&parts.headers), &state.config.api_token)
        {
            if bearer == expected.expose_secret() {
                return Ok(ApiAuth);
            }
        }

        if let Some(token) = extract_cookie_token(&parts.headers, &state.config.cookie.name) {
            let action =
                ResolveSessionAction::new(state.user_repo.clone(), state.session_repo.clone());
            if action.execute(&token).await.map_err(AppError)?.is_some() {
                return Ok(ApiAuth);
            }
        }

        Err(AppError(AuthError::Unauthorized))
    }
}
