//! HTTP adapter for the cancellation API.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{CancellationApiError, CancellationAppState};
pub use routes::cancellation_routes;
