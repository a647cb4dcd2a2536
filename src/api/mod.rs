//! Wire DTOs and the HTTP layer.

#[cfg(feature = "axum_api")]
pub mod axum;
mod types;

pub use types::*;
