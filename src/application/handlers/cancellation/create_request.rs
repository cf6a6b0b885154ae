//! CreateCancellationRequestHandler - opens a cancellation request.
//!
//! Sequencing matters: the request is persisted first (so it has an id),
//! then the refund QR is requested and attached, then the notification
//! fan-out runs. QR and email failures are logged and never abort the
//! flow; the caller still receives a success summary.

use std::sync::Arc;

use tracing::warn;

use crate::domain::cancellation::{
    prorate, CancellationError, CancellationRequest, NewCancellationRequest,
};
use crate::domain::foundation::{BookingId, Timestamp, UserId};
use crate::ports::{
    BookingStore, CancellationRequestRepository, EmailMessage, Mailer, RefundQrProvider,
    RoleDirectory,
};

use super::notifications::cancellation_notice;

/// Command to open a cancellation request.
#[derive(Debug, Clone)]
pub struct CreateCancellationRequestCommand {
    pub booking_id: BookingId,
    pub requested_by: UserId,
    pub reason: Option<String>,
}

/// Result of a successfully opened request.
#[derive(Debug, Clone)]
pub struct CreateCancellationRequestResult {
    pub request: CancellationRequest,

    /// Localized success message naming the requester role.
    pub message: String,

    /// Justification string from the proration calculator.
    pub proration_note: String,

    /// Refund QR reference, absent when the gateway call failed.
    pub refund_qr_url: Option<String>,
}

/// Handler for opening cancellation requests.
pub struct CreateCancellationRequestHandler {
    booking_store: Arc<dyn BookingStore>,
    role_directory: Arc<dyn RoleDirectory>,
    request_repository: Arc<dyn CancellationRequestRepository>,
    qr_provider: Arc<dyn RefundQrProvider>,
    mailer: Arc<dyn Mailer>,
}

impl CreateCancellationRequestHandler {
    pub fn new(
        booking_store: Arc<dyn BookingStore>,
        role_directory: Arc<dyn RoleDirectory>,
        request_repository: Arc<dyn CancellationRequestRepository>,
        qr_provider: Arc<dyn RefundQrProvider>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            booking_store,
            role_directory,
            request_repository,
            qr_provider,
            mailer,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCancellationRequestCommand,
    ) -> Result<CreateCancellationRequestResult, CancellationError> {
        // 1. Resolve the requester's role; unknown roles fail fast.
        let role = self
            .role_directory
            .role_of(cmd.requested_by)
            .await?
            .ok_or_else(|| CancellationError::role_not_found(cmd.requested_by))?;

        // 2. Load the booking.
        let booking = self
            .booking_store
            .find(cmd.booking_id)
            .await?
            .ok_or_else(|| CancellationError::booking_not_found(cmd.booking_id))?;

        // 3. One open request per booking.
        if self
            .request_repository
            .find_pending_by_booking(cmd.booking_id)
            .await?
            .is_some()
        {
            return Err(CancellationError::request_already_open(cmd.booking_id));
        }

        // 4. Prorate and persist the request in Pending state.
        let now = Timestamp::now();
        let proration = prorate(role, booking.deposit, booking.reference_time(now), now);
        let mut request = self
            .request_repository
            .insert(NewCancellationRequest::open(
                cmd.booking_id,
                cmd.requested_by,
                role,
                cmd.reason,
                &proration,
                now,
            ))
            .await?;

        // 5. Best-effort refund QR: a gateway failure leaves the request
        //    pending without a QR reference.
        match self
            .qr_provider
            .generate_refund_qr(booking.id, request.final_refund_amount)
            .await
        {
            Ok(url) => {
                request.attach_refund_qr(url)?;
                self.request_repository.update(&request).await?;
            }
            Err(err) => {
                warn!(
                    booking_id = %booking.id,
                    request_id = %request.id,
                    error = %err,
                    "refund QR generation failed, request left without QR"
                );
            }
        }

        // 6. Notify player and owner, independently, best-effort.
        let notice = cancellation_notice(&booking, &request);
        let recipients = [&booking.player_email, &booking.owner_email];
        for recipient in recipients.into_iter().flatten() {
            let message = EmailMessage {
                to: recipient.clone(),
                subject: notice.subject.clone(),
                html_body: notice.html_body.clone(),
            };
            if let Err(err) = self.mailer.send(message).await {
                warn!(
                    recipient = %recipient,
                    request_id = %request.id,
                    error = %err,
                    "cancellation notice delivery failed"
                );
            }
        }

        let message = format!(
            "Yêu cầu hủy đặt sân {} của {} đã được ghi nhận.",
            booking.id,
            role.display_vi()
        );
        let refund_qr_url = request.refund_qr_url.clone();

        Ok(CreateCancellationRequestResult {
            request,
            message,
            proration_note: proration.note,
            refund_qr_url,
        })
    }
}
