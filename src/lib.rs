pub mod actions;
pub mod api;
pub mod config;
pub mod cookie;
pub mod crypto;
#[cfg(feature = "gateway")]
pub mod gateway;
pub mod repository;
mod secret;
#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;

use std::fmt;

pub use config::{AuthConfig, CookieConfig, SameSite};
pub use repository::Credential;
pub use repository::CredentialRepository;
pub use repository::Session;
pub use repository::SessionRepository;
pub use repository::Task;
pub use repository::TaskPriority;
pub use repository::TaskRepository;
pub use repository::TaskStatus;
pub use repository::TaskStatusCounts;
pub use repository::TaskUpdate;
pub use repository::User;
pub use repository::UserRepository;
pub use secret::SecretString;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockCredentialRepository;
#[cfg(any(test, feature = "mocks"))]
pub use repository::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use repository::MockTaskRepository;
#[cfg(any(test, feature = "mocks"))]
pub use repository::MockUserRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Sign-up attempted with an email already on file.
    UserAlreadyExists,
    /// Unknown email or wrong password. Deliberately a single variant so
    /// the two causes cannot be told apart at the boundary.
    InvalidCredentials,
    /// No valid session where one is required.
    Unauthorized,
    NotFound,
    /// The relational store could not be reached or failed a statement.
    DatabaseError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UserAlreadyExists => write!(f, "User already exists"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Unauthorized => write!(f, "Unauthorized"),
            AuthError::NotFound => write!(f, "Not found"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
        }
    }
}
