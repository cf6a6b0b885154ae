//! Adapters - concrete implementations of the ports.

pub mod email;
pub mod http;
pub mod payment;
pub mod postgres;
