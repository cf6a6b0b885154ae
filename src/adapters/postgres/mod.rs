//! PostgreSQL adapters for the repository and store ports.

mod booking_store;
mod cancellation_record_repository;
mod cancellation_request_repository;
mod role_directory;

pub use booking_store::PostgresBookingStore;
pub use cancellation_record_repository::PostgresCancellationRecordRepository;
pub use cancellation_request_repository::PostgresCancellationRequestRepository;
pub use role_directory::PostgresRoleDirectory;
