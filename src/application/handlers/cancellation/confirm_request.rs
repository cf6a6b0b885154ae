//! ConfirmCancellationHandler - finalizes a pending request.
//!
//! Confirmation transitions the request to `Confirmed` through the
//! status-guarded store update, then writes the immutable cancellation
//! record and marks the booking cancelled. The guarded update runs first
//! so that when two confirmations race, only the winner reaches the
//! record and booking writes; there is no compensating rollback across
//! them.

use std::sync::Arc;

use tracing::info;

use crate::domain::cancellation::{
    CancellationError, CancellationRecord, CancellationRequest, NewCancellationRecord,
    RequestStatus,
};
use crate::domain::foundation::{ErrorCode, RequestId, Timestamp, UserId};
use crate::ports::{BookingStore, CancellationRecordRepository, CancellationRequestRepository};

/// Command to confirm a pending cancellation request.
#[derive(Debug, Clone)]
pub struct ConfirmCancellationCommand {
    pub request_id: RequestId,
    pub verified_by: UserId,
}

/// Result of a confirmed cancellation.
#[derive(Debug, Clone)]
pub struct ConfirmCancellationResult {
    pub record: CancellationRecord,
    pub request: CancellationRequest,
}

/// Handler for confirming cancellation requests.
pub struct ConfirmCancellationHandler {
    request_repository: Arc<dyn CancellationRequestRepository>,
    record_repository: Arc<dyn CancellationRecordRepository>,
    booking_store: Arc<dyn BookingStore>,
}

impl ConfirmCancellationHandler {
    pub fn new(
        request_repository: Arc<dyn CancellationRequestRepository>,
        record_repository: Arc<dyn CancellationRecordRepository>,
        booking_store: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            request_repository,
            record_repository,
            booking_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmCancellationCommand,
    ) -> Result<ConfirmCancellationResult, CancellationError> {
        // 1. Load and check the request.
        let mut request = self
            .request_repository
            .find_by_id(cmd.request_id)
            .await?
            .ok_or_else(|| CancellationError::request_not_found(cmd.request_id))?;

        if !request.is_pending() {
            return Err(CancellationError::already_processed(
                request.id,
                request.status,
            ));
        }

        // 2. The booking must still exist.
        let booking = self
            .booking_store
            .find(request.booking_id)
            .await?
            .ok_or_else(|| CancellationError::booking_not_found(request.booking_id))?;

        let now = Timestamp::now();

        // 3. Transition the request. The store update only applies while
        //    the row is still pending; the loser of a concurrent confirm
        //    stops here, before any record or booking write.
        request.confirm(now)?;
        self.request_repository
            .update(&request)
            .await
            .map_err(|err| {
                if err.code == ErrorCode::InvalidStateTransition {
                    CancellationError::already_processed(request.id, RequestStatus::Confirmed)
                } else {
                    CancellationError::from(err)
                }
            })?;

        // 4. Write the audit record.
        let record = self
            .record_repository
            .insert(NewCancellationRecord::from_request(
                &request,
                cmd.verified_by,
                now,
            ))
            .await?;

        // 5. Mark the booking cancelled.
        self.booking_store
            .mark_cancelled(booking.id, now, request.user_reason.clone())
            .await?;

        info!(
            request_id = %request.id,
            booking_id = %booking.id,
            cancellation_id = %record.id,
            verified_by = %cmd.verified_by,
            "cancellation confirmed"
        );

        Ok(ConfirmCancellationResult { record, request })
    }
}
