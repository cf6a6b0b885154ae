//! Mock refund QR provider for testing and local development.
//!
//! Supports error injection and call tracking.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{BookingId, Money};
use crate::ports::{QrError, RefundQrProvider};

/// Recorded QR generation call.
#[derive(Debug, Clone)]
pub struct QrCall {
    pub booking_id: BookingId,
    pub amount: Money,
}

#[derive(Default)]
struct MockState {
    /// Error to return on the next call.
    next_error: Option<QrError>,
    /// Recorded calls for assertions.
    call_log: Vec<QrCall>,
}

/// Mock refund QR provider.
///
/// Returns a deterministic URL derived from the booking id unless an
/// error has been injected.
#[derive(Default)]
pub struct MockRefundQrProvider {
    inner: Arc<Mutex<MockState>>,
}

impl MockRefundQrProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an error to return on the next call.
    pub fn set_error(&self, error: QrError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<QrCall> {
        self.inner.lock().unwrap().call_log.clone()
    }
}

impl Clone for MockRefundQrProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl RefundQrProvider for MockRefundQrProvider {
    async fn generate_refund_qr(
        &self,
        booking_id: BookingId,
        amount: Money,
    ) -> Result<String, QrError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(QrCall { booking_id, amount });

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(format!(
            "https://qr.mock.local/refund/{}?amount={}",
            booking_id,
            amount.as_minor()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_deterministic_url_and_tracks_calls() {
        let mock = MockRefundQrProvider::new();

        let url = mock
            .generate_refund_qr(BookingId::new(12), Money::from_major(80_000))
            .await
            .unwrap();

        assert_eq!(url, "https://qr.mock.local/refund/12?amount=8000000");
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].booking_id, BookingId::new(12));
    }

    #[tokio::test]
    async fn injected_error_is_returned_once() {
        let mock = MockRefundQrProvider::new();
        mock.set_error(QrError::Network("connection refused".to_string()));

        let first = mock
            .generate_refund_qr(BookingId::new(1), Money::from_major(1))
            .await;
        assert!(first.is_err());

        let second = mock
            .generate_refund_qr(BookingId::new(1), Money::from_major(1))
            .await;
        assert!(second.is_ok());
    }
}
