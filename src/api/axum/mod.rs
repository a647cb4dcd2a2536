mod error;
mod handlers;
mod middleware;
mod routes;

#[cfg(feature = "gateway")]
pub mod tasks;

pub use error::AppError;
pub use middleware::{extract_bearer_token, extract_cookie_token, SessionUser};
pub use routes::{auth_routes, AppState};
