//! Ports - async trait seams to every external collaborator.

mod booking_store;
mod cancellation_record_repository;
mod cancellation_request_repository;
mod mailer;
mod refund_qr;
mod role_directory;

pub use booking_store::{Booking, BookingStatus, BookingStore};
pub use cancellation_record_repository::CancellationRecordRepository;
pub use cancellation_request_repository::CancellationRequestRepository;
pub use mailer::{EmailMessage, MailError, Mailer};
pub use refund_qr::{QrError, RefundQrProvider};
pub use role_directory::RoleDirectory;
