//! Payment gateway adapters for refund QR generation.

mod mock_refund_qr;
mod vietqr_provider;

pub use mock_refund_qr::MockRefundQrProvider;
pub use vietqr_provider::{VietQrConfig, VietQrProvider};
