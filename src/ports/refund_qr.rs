//! Refund QR port for the payment gateway.
//!
//! The gateway produces an opaque URL/code representing a refund to be
//! completed by bank-transfer scan. No retry contract; callers treat the
//! operation as best-effort.

use async_trait::async_trait;

use crate::domain::foundation::{BookingId, Money};

/// Port over the payment gateway's refund-QR generation.
#[async_trait]
pub trait RefundQrProvider: Send + Sync {
    /// Requests a refund QR for the given booking and amount.
    ///
    /// The returned string is opaque to this core.
    async fn generate_refund_qr(
        &self,
        booking_id: BookingId,
        amount: Money,
    ) -> Result<String, QrError>;
}

/// Errors from the payment gateway.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QrError {
    #[error("payment gateway unreachable: {0}")]
    Network(String),

    #[error("payment gateway rejected the request: {0}")]
    Rejected(String),

    #[error("payment gateway returned an unusable response: {0}")]
    BadResponse(String),
}
