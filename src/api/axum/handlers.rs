//! HTTP handlers for the authentication endpoints.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::error::AppError;
use super::middleware::extract_cookie_token;
use super::routes::AppState;
use crate::actions::{ResolveSessionAction, SignInAction, SignOutAction, SignUpAction};
use crate::api::{
    AuthResponse, CurrentSessionResponse, SignInRequest, SignOutResponse, SignUpRequest,
};
use crate::cookie::{removal_cookie, session_cookie};
use crate::{CredentialRepository, SessionRepository, UserRepository};

/// Register a new identity and establish a session.
///
/// POST /sign-up/email
pub async fn sign_up<U, C, S>(
    State(state): State<AppState<U, C, S>>,
    Json(body): Json<SignUpRequest>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: CredentialRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let config = state.config.clone();
    let action = SignUpAction::new(
        state.user_repo,
        state.credential_repo,
        state.session_repo,
        state.config,
    );

    match action.execute(&body.name, &body.email, &body.password).await {
        Ok((user, session)) => {
            let cookie = session_cookie(&session.token, config.session_lifetime, &config.cookie);
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie.to_string())],
                Json(AuthResponse {
                    user: user.into(),
                    token: session.token,
                }),
            )
                .into_response()
        }
        Err(err) => AppError(err).into_response(),
    }
}

/// Authenticate by password and establish a new session.
///
/// POST /sign-in/email
pub async fn sign_in<U, C, S>(
    State(state): State<AppState<U, C, S>>,
    Json(body): Json<SignInRequest>,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: CredentialRepository + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let config = state.config.clone();
    let action = SignInAction::new(
        state.user_repo,
        state.credential_repo,
        state.session_repo,
        state.config,
    );

    match action.execute(&body.email, &body.password).await {
        Ok((user, session)) => {
            let cookie = session_cookie(&session.token, config.session_lifetime, &config.cookie);
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie.to_string())],
                Json(AuthResponse {
                    user: user.into(),
                    token: session.token,
                }),
            )
                .into_response()
        }
        Err(err) => AppError(err).into_response(),
    }
}

/// Resolve the cookie session, if any.
///
/// GET /get-session
pub async fn get_session<U, C, S>(
    State(state): State<AppState<U, C, S>>,
    headers: HeaderMap,
) -> Response
where
    U: UserRepository + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = extract_cookie_token(&headers, &state.config.cookie.name) else {
        return Json(CurrentSessionResponse::anonymous()).into_response();
    };

    let action = ResolveSessionAction::new(state.user_repo, state.session_repo);

    match action.execute(&token).await {
        Ok(Some((user, session))) => Json(CurrentSessionResponse {
            user: Some(user.into()),
            session: Some(session.into()),
        })
        .into_response(),
        Ok(None) => Json(CurrentSessionResponse::anonymous()).into_response(),
        // Only a store failure errors; absence never does.
        Err(err) => AppError(err).into_response(),
    }
}

/// Invalidate the cookie session and clear the cookie.
///
/// POST /sign-out
pub async fn sign_out<U, C, S>(
    State(state): State<AppState<U, C, S>>,
    headers: HeaderMap,
) -> Response
where
    U: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie_token(&headers, &state.config.cookie.name) {
        let action = SignOutAction::new(state.session_repo);
        if let Err(err) = action.execute(&token).await {
            return AppError(err).into_response();
        }
    }

    let cookie = removal_cookie(&state.config.cookie);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(SignOutResponse { success: true }),
    )
        .into_response()
}
