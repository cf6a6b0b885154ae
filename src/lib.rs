//! Fieldbook - Football Pitch Booking Platform
//!
//! This crate implements the cancellation and refund core: role-aware
//! deposit proration, the cancellation request lifecycle, and the refund
//! QR / notification side effects.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
