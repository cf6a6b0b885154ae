//! Cancellation request aggregate.
//!
//! A request is opened by a player or owner against a booking, carries the
//! proration amounts computed at open time, and waits in `Pending` until
//! staff either confirm it (producing an immutable cancellation record) or
//! delete it. The user-supplied reason and the machine-generated refund-QR
//! URL are separate fields.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, Money, RequestId, StateMachine, Timestamp, UserId,
};

use super::{Proration, RequestStatus, RequesterRole};

/// Advisory grace period during which the requester could change their mind.
///
/// Stored and exposed to callers; no component enforces it.
pub const UNDO_GRACE_MINUTES: i64 = 5;

/// A cancellation request not yet persisted (no id assigned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCancellationRequest {
    pub booking_id: BookingId,
    pub requested_by: UserId,
    pub requested_role: RequesterRole,
    pub user_reason: Option<String>,
    pub requested_at: Timestamp,
    pub status: RequestStatus,
    pub refund_amount: Money,
    pub penalty_amount: Money,
    pub final_refund_amount: Money,
    pub undo_allowed_until: Timestamp,
}

impl NewCancellationRequest {
    /// Opens a request in `Pending` state from a proration outcome.
    pub fn open(
        booking_id: BookingId,
        requested_by: UserId,
        requested_role: RequesterRole,
        user_reason: Option<String>,
        proration: &Proration,
        now: Timestamp,
    ) -> Self {
        Self {
            booking_id,
            requested_by,
            requested_role,
            user_reason,
            requested_at: now,
            status: RequestStatus::Pending,
            refund_amount: proration.refund_amount,
            penalty_amount: proration.penalty_amount,
            final_refund_amount: proration.final_refund_amount,
            undo_allowed_until: now.plus_minutes(UNDO_GRACE_MINUTES),
        }
    }
}

/// A persisted cancellation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationRequest {
    pub id: RequestId,
    pub booking_id: BookingId,
    pub requested_by: UserId,
    pub requested_role: RequesterRole,
    pub user_reason: Option<String>,
    pub refund_qr_url: Option<String>,
    pub requested_at: Timestamp,
    pub status: RequestStatus,
    pub refund_amount: Money,
    pub penalty_amount: Money,
    pub final_refund_amount: Money,
    pub undo_allowed_until: Timestamp,
    pub processed_at: Option<Timestamp>,
}

impl CancellationRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Attaches the refund QR reference obtained from the payment gateway.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error if the request is no longer pending.
    pub fn attach_refund_qr(&mut self, url: impl Into<String>) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot attach refund QR to request {} in {:?} state",
                    self.id, self.status
                ),
            ));
        }
        self.refund_qr_url = Some(url.into());
        Ok(())
    }

    /// Transitions the request to `Confirmed` and stamps the processing time.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error if the request is not pending.
    pub fn confirm(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(RequestStatus::Confirmed)
            .map_err(|_| {
                DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!(
                        "Cannot confirm request {} in {:?} state",
                        self.id, self.status
                    ),
                )
            })?;
        self.processed_at = Some(now);
        Ok(())
    }

    /// Whether the advisory undo window is still open at `now`.
    pub fn undo_window_open(&self, now: Timestamp) -> bool {
        self.is_pending() && !now.is_after(&self.undo_allowed_until)
    }
}
