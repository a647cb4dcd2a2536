//! SQLite repository implementations.
//!
//! Enable the `sqlx_sqlite` feature to use these. Each repository
//! holds a clone of the shared [`SqlitePool`]; the pool manages its
//! own connection lifecycle.

pub mod migrations;

mod credential;
mod session;
mod task;
mod user;

pub use credential::SqliteCredentialRepository;
pub use session::SqliteSessionRepository;
use sqlx::SqlitePool;
pub use task::SqliteTaskRepository;
pub use user::SqliteUserRepository;

/// Creates all SQLite repository instances from one connection pool.
pub fn create_repositories(
    pool: SqlitePool,
) -> (
    SqliteUserRepository,
    SqliteCredentialRepository,
    SqliteSessionRepository,
    SqliteTaskRepository,
) {
    (
        SqliteUserRepository::new(pool.clone()),
        SqliteCredentialRepository::new(pool.clone()),
        SqliteSessionRepository::new(pool.clone()),
        SqliteTaskRepository::new(pool),
    )
}
