//! Cancellation-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | BookingNotFound | 404 |
//! | RequestNotFound | 404 |
//! | RoleNotFound | 404 |
//! | AlreadyProcessed | 409 |
//! | RequestAlreadyOpen | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, RequestId, UserId};

use super::RequestStatus;

/// Errors raised by the cancellation lifecycle and its handlers.
///
/// NotFound and InvalidState variants carry Vietnamese customer-facing
/// messages; infrastructure failures keep the technical detail.
#[derive(Debug, Clone, PartialEq)]
pub enum CancellationError {
    /// The referenced booking does not exist.
    BookingNotFound(BookingId),

    /// The cancellation request does not exist.
    RequestNotFound(RequestId),

    /// The requester's role could not be resolved to player or owner.
    RoleNotFound(UserId),

    /// The request has already left the `Pending` state.
    AlreadyProcessed {
        request: RequestId,
        status: RequestStatus,
    },

    /// The booking already has an open cancellation request.
    RequestAlreadyOpen(BookingId),

    /// Input validation failed.
    ValidationFailed { field: String, message: String },

    /// Store or collaborator failure.
    Infrastructure(String),
}

impl CancellationError {
    pub fn booking_not_found(id: BookingId) -> Self {
        CancellationError::BookingNotFound(id)
    }

    pub fn request_not_found(id: RequestId) -> Self {
        CancellationError::RequestNotFound(id)
    }

    pub fn role_not_found(user: UserId) -> Self {
        CancellationError::RoleNotFound(user)
    }

    pub fn already_processed(request: RequestId, status: RequestStatus) -> Self {
        CancellationError::AlreadyProcessed { request, status }
    }

    pub fn request_already_open(booking: BookingId) -> Self {
        CancellationError::RequestAlreadyOpen(booking)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CancellationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CancellationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CancellationError::BookingNotFound(_) => ErrorCode::BookingNotFound,
            CancellationError::RequestNotFound(_) => ErrorCode::RequestNotFound,
            CancellationError::RoleNotFound(_) => ErrorCode::RoleNotFound,
            CancellationError::AlreadyProcessed { .. } => ErrorCode::InvalidStateTransition,
            CancellationError::RequestAlreadyOpen(_) => ErrorCode::RequestAlreadyOpen,
            CancellationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CancellationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the business-readable error message.
    pub fn message(&self) -> String {
        match self {
            CancellationError::BookingNotFound(id) => {
                format!("Không tìm thấy đặt sân (mã {})", id)
            }
            CancellationError::RequestNotFound(id) => {
                format!("Không tìm thấy yêu cầu hủy (mã {})", id)
            }
            CancellationError::RoleNotFound(user) => {
                format!("Không xác định được vai trò của người dùng {}", user)
            }
            CancellationError::AlreadyProcessed { request, status } => {
                format!(
                    "Yêu cầu hủy {} đã được xử lý (trạng thái: {})",
                    request,
                    status.as_str()
                )
            }
            CancellationError::RequestAlreadyOpen(booking) => {
                format!(
                    "Đặt sân {} đã có yêu cầu hủy đang chờ xử lý",
                    booking
                )
            }
            CancellationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CancellationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CancellationError::Infrastructure(_))
    }
}

impl std::fmt::Display for CancellationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CancellationError {}

impl From<DomainError> for CancellationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => CancellationError::Infrastructure(err.to_string()),
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => {
                CancellationError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => CancellationError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CancellationError> for DomainError {
    fn from(err: CancellationError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_not_found_codes() {
        assert_eq!(
            CancellationError::booking_not_found(BookingId::new(5)).code(),
            ErrorCode::BookingNotFound
        );
        assert_eq!(
            CancellationError::request_not_found(RequestId::new(5)).code(),
            ErrorCode::RequestNotFound
        );
        assert_eq!(
            CancellationError::role_not_found(UserId::new(5)).code(),
            ErrorCode::RoleNotFound
        );
    }

    #[test]
    fn already_processed_carries_status() {
        let err = CancellationError::already_processed(RequestId::new(3), RequestStatus::Confirmed);
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert!(err.message().contains("confirmed"));
        assert!(err.message().contains('3'));
    }

    #[test]
    fn messages_name_the_offending_id() {
        let err = CancellationError::booking_not_found(BookingId::new(42));
        assert!(err.message().contains("42"));

        let err = CancellationError::request_already_open(BookingId::new(42));
        assert!(err.message().contains("42"));
    }

    #[test]
    fn only_infrastructure_is_retryable() {
        assert!(CancellationError::infrastructure("timeout").is_retryable());
        assert!(!CancellationError::booking_not_found(BookingId::new(1)).is_retryable());
        assert!(!CancellationError::already_processed(RequestId::new(1), RequestStatus::Confirmed)
            .is_retryable());
    }

    #[test]
    fn display_matches_message() {
        let err = CancellationError::role_not_found(UserId::new(9));
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_to_and_from_domain_error() {
        let err = CancellationError::booking_not_found(BookingId::new(5));
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.code, err.code());

        let db = DomainError::new(ErrorCode::DatabaseError, "connection lost");
        let back: CancellationError = db.into();
        assert!(matches!(back, CancellationError::Infrastructure(_)));
    }
}
