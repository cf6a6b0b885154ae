//! Cancellation record - the immutable audit trail.
//!
//! Created exactly once when a request is confirmed, never mutated
//! afterwards. Owned by the lifecycle handlers; read-only everywhere else.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, CancellationId, Money, RequestId, Timestamp, UserId};

use super::{CancellationRequest, RequesterRole};

/// A cancellation record not yet persisted (no id assigned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCancellationRecord {
    pub booking_id: BookingId,
    pub request_id: RequestId,
    pub cancelled_by: RequesterRole,
    pub cancel_reason: Option<String>,
    pub refund_amount: Money,
    pub penalty_amount: Money,
    pub created_at: Timestamp,
    pub verified_by: UserId,
    pub verified_at: Timestamp,
}

impl NewCancellationRecord {
    /// Copies the audit fields from a request at confirmation time.
    pub fn from_request(
        request: &CancellationRequest,
        verified_by: UserId,
        now: Timestamp,
    ) -> Self {
        Self {
            booking_id: request.booking_id,
            request_id: request.id,
            cancelled_by: request.requested_role,
            cancel_reason: request.user_reason.clone(),
            refund_amount: request.refund_amount,
            penalty_amount: request.penalty_amount,
            created_at: now,
            verified_by,
            verified_at: now,
        }
    }
}

/// A persisted, immutable cancellation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationRecord {
    pub id: CancellationId,
    pub booking_id: BookingId,
    pub request_id: RequestId,
    pub cancelled_by: RequesterRole,
    pub cancel_reason: Option<String>,
    pub refund_amount: Money,
    pub penalty_amount: Money,
    pub created_at: Timestamp,
    pub verified_by: UserId,
    pub verified_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cancellation::RequestStatus;

    #[test]
    fn from_request_copies_audit_fields() {
        let now = Timestamp::now();
        let request = CancellationRequest {
            id: RequestId::new(3),
            booking_id: BookingId::new(12),
            requested_by: UserId::new(7),
            requested_role: RequesterRole::Owner,
            user_reason: Some("Sân bảo trì".to_string()),
            refund_qr_url: Some("https://pay.example/qr/12".to_string()),
            requested_at: now,
            status: RequestStatus::Pending,
            refund_amount: Money::from_major(150_000),
            penalty_amount: Money::from_major(135_000),
            final_refund_amount: Money::from_major(285_000),
            undo_allowed_until: now.plus_minutes(5),
            processed_at: None,
        };

        let verified_at = now.plus_minutes(60);
        let record = NewCancellationRecord::from_request(&request, UserId::new(99), verified_at);

        assert_eq!(record.booking_id, BookingId::new(12));
        assert_eq!(record.request_id, RequestId::new(3));
        assert_eq!(record.cancelled_by, RequesterRole::Owner);
        assert_eq!(record.cancel_reason.as_deref(), Some("Sân bảo trì"));
        assert_eq!(record.refund_amount, Money::from_major(150_000));
        assert_eq!(record.penalty_amount, Money::from_major(135_000));
        assert_eq!(record.verified_by, UserId::new(99));
        assert_eq!(record.created_at, verified_at);
        assert_eq!(record.verified_at, verified_at);
    }
}
