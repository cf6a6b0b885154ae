//! Domain layer - pure business logic, no I/O.

pub mod cancellation;
pub mod foundation;
