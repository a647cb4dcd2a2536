use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use super::error::AppError;
use super::routes::AppState;
use crate::actions::ResolveSessionAction;
use crate::cookie::extract_session_token;
use crate::{Session, SessionRepository, User, UserRepository};

/// Request guard for protected routes: extracts the session token
/// from the cookie header and resolves it, rejecting with
/// `Unauthorized` otherwise. A missing cookie and an invalid session
/// are indistinguishable to the caller.
///
/// The rejection is a 401 JSON body; page routes that want a redirect
/// instead should map the rejection themselves (see the demo server).
#[derive(Debug, Clone)]
pub struct SessionUser<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user: User,
    session: Session,
    _marker: PhantomData<(U, S)>,
}

impl<U, S> SessionUser<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_parts(self) -> (User, Session) {
        (self.user, self.session)
    }
}

/// Pulls the session token out of a request's `Cookie` header.
pub fn extract_cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get(COOKIE)?
        .to_str()
        .ok()
        .and_then(|header| extract_session_token(header, cookie_name))
}

/// Pulls the bearer token out of a request's `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(ToOwned::to_owned)
}

impl<U, C, S> FromRequestParts<AppState<U, C, S>> for SessionUser<U, S>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, C, S>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_cookie_token(&parts.headers, &state.config.cookie.name)
            .ok_or(AppError(crate::AuthError::Unauthorized))?;

        let action =
            ResolveSessionAction::new(state.user_repo.clone(), state.session_repo.clone());
        let (user, session) = action.require(&token).await.map_err(AppError)?;

        Ok(SessionUser {
            user,
            session,
            _marker: PhantomData,
        })
    }
}
