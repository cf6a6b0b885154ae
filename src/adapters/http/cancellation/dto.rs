//! HTTP DTOs for the cancellation endpoints.
//!
//! These types define the JSON request/response structure of the
//! cancellation API. Money fields are serialized as whole currency
//! units with two decimal places.

use crate::application::handlers::cancellation::{
    ConfirmCancellationResult, CreateCancellationRequestResult, GetCancellationRequestResult,
};
use crate::domain::cancellation::{CancellationRecord, CancellationRequest};
use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a cancellation request for a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCancellationRequest {
    /// The booking to cancel.
    pub booking_id: i64,
    /// Optional free-text reason from the requester.
    #[serde(default)]
    pub reason: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A cancellation request as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct CancellationRequestResponse {
    pub id: i64,
    pub booking_id: i64,
    pub requested_by: i64,
    /// "player" or "owner".
    pub requested_role: String,
    pub user_reason: Option<String>,
    pub refund_qr_url: Option<String>,
    /// When the request was opened (ISO 8601).
    pub requested_at: String,
    /// "pending" or "confirmed".
    pub status: String,
    /// Deposit amount in whole currency units.
    pub refund_amount: f64,
    /// Penalty (player) or compensation (owner) in whole currency units.
    pub penalty_amount: f64,
    /// Amount actually refunded to the player.
    pub final_refund_amount: f64,
    /// End of the advisory undo window (ISO 8601).
    pub undo_allowed_until: String,
    /// When the request was confirmed (ISO 8601), if it was.
    pub processed_at: Option<String>,
}

impl From<CancellationRequest> for CancellationRequestResponse {
    fn from(request: CancellationRequest) -> Self {
        Self {
            id: request.id.as_i64(),
            booking_id: request.booking_id.as_i64(),
            requested_by: request.requested_by.as_i64(),
            requested_role: request.requested_role.as_str().to_string(),
            user_reason: request.user_reason,
            refund_qr_url: request.refund_qr_url,
            requested_at: request.requested_at.as_datetime().to_rfc3339(),
            status: request.status.as_str().to_string(),
            refund_amount: request.refund_amount.as_major_f64(),
            penalty_amount: request.penalty_amount.as_major_f64(),
            final_refund_amount: request.final_refund_amount.as_major_f64(),
            undo_allowed_until: request.undo_allowed_until.as_datetime().to_rfc3339(),
            processed_at: request.processed_at.map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

/// A finalized cancellation record as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct CancellationRecordResponse {
    pub id: i64,
    pub booking_id: i64,
    pub request_id: i64,
    /// "player" or "owner".
    pub cancelled_by: String,
    pub cancel_reason: Option<String>,
    pub refund_amount: f64,
    pub penalty_amount: f64,
    /// Staff member who confirmed the cancellation.
    pub verified_by: i64,
    /// When the cancellation was confirmed (ISO 8601).
    pub verified_at: String,
}

impl From<CancellationRecord> for CancellationRecordResponse {
    fn from(record: CancellationRecord) -> Self {
        Self {
            id: record.id.as_i64(),
            booking_id: record.booking_id.as_i64(),
            request_id: record.request_id.as_i64(),
            cancelled_by: record.cancelled_by.as_str().to_string(),
            cancel_reason: record.cancel_reason,
            refund_amount: record.refund_amount.as_major_f64(),
            penalty_amount: record.penalty_amount.as_major_f64(),
            verified_by: record.verified_by.as_i64(),
            verified_at: record.verified_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for an opened cancellation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCancellationResponse {
    pub request: CancellationRequestResponse,
    /// Localized success message.
    pub message: String,
    /// Justification of the computed refund percent.
    pub proration_note: String,
    pub refund_qr_url: Option<String>,
}

impl From<CreateCancellationRequestResult> for CreateCancellationResponse {
    fn from(result: CreateCancellationRequestResult) -> Self {
        Self {
            request: result.request.into(),
            message: result.message,
            proration_note: result.proration_note,
            refund_qr_url: result.refund_qr_url,
        }
    }
}

/// Response for a confirmed cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmCancellationResponse {
    pub record: CancellationRecordResponse,
    pub request: CancellationRequestResponse,
}

impl From<ConfirmCancellationResult> for ConfirmCancellationResponse {
    fn from(result: ConfirmCancellationResult) -> Self {
        Self {
            record: result.record.into(),
            request: result.request.into(),
        }
    }
}

/// Response for a single cancellation request.
#[derive(Debug, Clone, Serialize)]
pub struct GetCancellationResponse {
    pub request: CancellationRequestResponse,
    /// Whether the advisory undo window is still open.
    pub undo_window_open: bool,
}

impl From<GetCancellationRequestResult> for GetCancellationResponse {
    fn from(result: GetCancellationRequestResult) -> Self {
        Self {
            request: result.request.into(),
            undo_window_open: result.undo_window_open,
        }
    }
}

/// Response for the request listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListCancellationResponse {
    pub requests: Vec<CancellationRequestResponse>,
}

/// Standard error response structure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cancellation::{RequestStatus, RequesterRole};
    use crate::domain::foundation::{BookingId, Money, RequestId, Timestamp, UserId};

    fn sample_request() -> CancellationRequest {
        let now = Timestamp::now();
        CancellationRequest {
            id: RequestId::new(5),
            booking_id: BookingId::new(12),
            requested_by: UserId::new(7),
            requested_role: RequesterRole::Player,
            user_reason: Some("Trời mưa to".to_string()),
            refund_qr_url: None,
            requested_at: now,
            status: RequestStatus::Pending,
            refund_amount: Money::from_major(200_000),
            penalty_amount: Money::from_major(120_000),
            final_refund_amount: Money::from_major(80_000),
            undo_allowed_until: now.plus_minutes(5),
            processed_at: None,
        }
    }

    #[test]
    fn request_response_uses_api_representations() {
        let response = CancellationRequestResponse::from(sample_request());

        assert_eq!(response.id, 5);
        assert_eq!(response.requested_role, "player");
        assert_eq!(response.status, "pending");
        assert_eq!(response.refund_amount, 200_000.0);
        assert_eq!(response.final_refund_amount, 80_000.0);
        assert!(response.processed_at.is_none());
    }

    #[test]
    fn create_request_body_accepts_missing_reason() {
        let body: CreateCancellationRequest =
            serde_json::from_str(r#"{"booking_id": 12}"#).unwrap();
        assert_eq!(body.booking_id, 12);
        assert!(body.reason.is_none());
    }

    #[test]
    fn error_response_serializes_code_and_message() {
        let json = serde_json::to_value(ErrorResponse::new("BOOKING_NOT_FOUND", "Không tìm thấy"))
            .unwrap();
        assert_eq!(json["error_code"], "BOOKING_NOT_FOUND");
        assert_eq!(json["message"], "Không tìm thấy");
    }
}
