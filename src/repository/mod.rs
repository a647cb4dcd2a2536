//! Repository traits and data types.
//!
//! Storage abstractions for the authentication tables (`user`,
//! `account`, `session`) and the dashboard task store. Implement these
//! traits to target another backend; `sqlite` ships the sqlx-backed
//! implementations.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | Identity lookup and creation |
//! | [`CredentialRepository`] | Stored password material per provider |
//! | [`SessionRepository`] | Session rows keyed by bearer token |
//! | [`TaskRepository`] | Dashboard task rows |
//!
//! The `mocks` feature (always on under `cfg(test)`) provides
//! in-memory implementations for test suites.

mod credential;
mod session;
mod task;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod credential_mock;
#[cfg(any(test, feature = "mocks"))]
mod session_mock;
#[cfg(any(test, feature = "mocks"))]
mod task_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use credential::Credential;
pub use credential::CredentialRepository;
pub use credential::PASSWORD_PROVIDER;
pub use session::Session;
pub use session::SessionRepository;
pub use task::Task;
pub use task::TaskPriority;
pub use task::TaskRepository;
pub use task::TaskStatus;
pub use task::TaskStatusCounts;
pub use task::TaskUpdate;
pub use user::User;
pub use user::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use credential_mock::MockCredentialRepository;
#[cfg(any(test, feature = "mocks"))]
pub use session_mock::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use task_mock::MockTaskRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
