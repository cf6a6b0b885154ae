//! Application layer - command/query handlers orchestrating the domain
//! through the ports.

pub mod handlers;
