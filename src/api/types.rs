//! Request and response DTOs.
//!
//! Response field names are the wire contract: camelCase, timestamps
//! as RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::{TaskPriority, TaskStatus};
use crate::{AuthError, SecretString, Session, User};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

// Response DTOs

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for SessionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionResponse")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// `get-session` never errors on absence: an anonymous visitor is the
/// double-null body, not a 4xx.
#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    pub user: Option<UserResponse>,
    pub session: Option<SessionResponse>,
}

impl CurrentSessionResponse {
    pub fn anonymous() -> Self {
        Self {
            user: None,
            session: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<crate::Task>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse {
            error: err.to_string(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            id: session.id,
            user_id: session.user_id,
            token: session.token,
            expires_at: session.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_response_uses_camel_case_wire_names() {
        let session = Session {
            id: "s1".to_owned(),
            user_id: "u1".to_owned(),
            token: "tok".to_owned(),
            expires_at: Utc::now(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(SessionResponse::from(session)).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("expiresAt").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn user_response_timestamp_is_rfc3339() {
        let user = User::mock();
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let created_at = json["createdAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(created_at).is_ok());
    }

    #[test]
    fn auth_response_debug_redacts_token() {
        let response = AuthResponse {
            user: User::mock().into(),
            token: "super-secret-token".to_owned(),
        };
        let debug = format!("{response:?}");
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn error_response_carries_the_display_message() {
        let body: ErrorResponse = AuthError::InvalidCredentials.into();
        assert_eq!(body.error, "Invalid credentials");
    }
}
