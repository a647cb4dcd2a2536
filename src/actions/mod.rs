//! One action per authentication operation.
//!
//! Actions hold the repositories they need and the injected
//! [`AuthConfig`](crate::AuthConfig); the HTTP layer constructs them
//! per request. Every store call is a single suspend-until-complete
//! round trip, with no batching and no retries.

pub mod resolve_session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use resolve_session::ResolveSessionAction;
pub use sign_in::SignInAction;
pub use sign_out::SignOutAction;
pub use sign_up::SignUpAction;
