//! HTTP adapters - REST API implementations.

pub mod cancellation;

// Re-export key types for convenience
pub use cancellation::cancellation_routes;
pub use cancellation::CancellationAppState;
