//! Dashboard API: task queue and gateway metrics.
//!
//! Machine-to-machine surface guarded by [`ApiAuth`]: a pre-shared
//! bearer secret (the gateway calling back) or a valid cookie session
//! (the browser dashboard) are equally sufficient.

mod handlers;
mod middleware;
mod routes;

pub use middleware::ApiAuth;
pub use routes::{dashboard_routes, DashboardState};
