//! DeleteCancellationRequestHandler - withdraws a pending request.
//!
//! Deletion is only allowed while the request is still `Pending`. A
//! confirmed request is part of the audit trail and cannot be removed.

use std::sync::Arc;

use tracing::info;

use crate::domain::cancellation::CancellationError;
use crate::domain::foundation::RequestId;
use crate::ports::CancellationRequestRepository;

/// Command to delete a pending cancellation request.
#[derive(Debug, Clone)]
pub struct DeleteCancellationRequestCommand {
    pub request_id: RequestId,
}

/// Result of a deleted cancellation request.
#[derive(Debug, Clone)]
pub struct DeleteCancellationRequestResult {
    pub request_id: RequestId,
    pub message: String,
}

/// Handler for deleting pending cancellation requests.
pub struct DeleteCancellationRequestHandler {
    request_repository: Arc<dyn CancellationRequestRepository>,
}

impl DeleteCancellationRequestHandler {
    pub fn new(request_repository: Arc<dyn CancellationRequestRepository>) -> Self {
        Self { request_repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCancellationRequestCommand,
    ) -> Result<DeleteCancellationRequestResult, CancellationError> {
        let request = self
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

        self.request_repository.delete(request.id).await?;

        info!(
            request_id = %request.id,
            booking_id = %request.booking_id,
            "cancellation request deleted"
        );

        Ok(DeleteCancellationRequestResult {
            request_id: request.id,
            message: format!("Đã xóa yêu cầu hủy đặt sân {}.", request.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cancellation::{
        CancellationRequest, NewCancellationRequest, Proration, RequesterRole,
    };
    use crate::domain::foundation::{BookingId, DomainError, Money, Timestamp, UserId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockRequestRepository {
        requests: Mutex<Vec<CancellationRequest>>,
    }

    impl MockRequestRepository {
        fn with_request(request: CancellationRequest) -> Self {
            Self {
                requests: Mutex::new(vec![request]),
            }
        }

        fn empty() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }

        fn stored(&self) -> Vec<CancellationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CancellationRequestRepository for MockRequestRepository {
        async fn insert(
            &self,
            _request: NewCancellationRequest,
        ) -> Result<CancellationRequest, DomainError> {
            unreachable!("delete never inserts requests")
        }

        async fn update(&self, _request: &CancellationRequest) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: RequestId,
        ) -> Result<Option<CancellationRequest>, DomainError> {
            Ok(self
                .requests
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn find_pending_by_booking(
            &self,
            _booking: BookingId,
        ) -> Result<Option<CancellationRequest>, DomainError> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<CancellationRequest>, DomainError> {
            Ok(self.stored())
        }

        async fn delete(&self, id: RequestId) -> Result<(), DomainError> {
            self.requests.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }

    fn pending_request() -> CancellationRequest {
        let now = Timestamp::now();
        let proration =
            Proration::compute(RequesterRole::Player, Money::from_major(200_000), 1.0);
        let new = NewCancellationRequest::open(
            BookingId::new(12),
            UserId::new(7),
            RequesterRole::Player,
            None,
            &proration,
            now,
        );
        CancellationRequest {
            id: RequestId::new(5),
            booking_id: new.booking_id,
            requested_by: new.requested_by,
            requested_role: new.requested_role,
            user_reason: new.user_reason,
            refund_qr_url: None,
            requested_at: new.requested_at,
            status: new.status,
            refund_amount: new.refund_amount,
            penalty_amount: new.penalty_amount,
            final_refund_amount: new.final_refund_amount,
            undo_allowed_until: new.undo_allowed_until,
            processed_at: None,
        }
    }

    fn command() -> DeleteCancellationRequestCommand {
        DeleteCancellationRequestCommand {
            request_id: RequestId::new(5),
        }
    }

    #[tokio::test]
    async fn deletes_a_pending_request() {
        let repo = Arc::new(MockRequestRepository::with_request(pending_request()));
        let handler = DeleteCancellationRequestHandler::new(repo.clone());

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.request_id, RequestId::new(5));
        assert!(result.message.contains("Đã xóa"));
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn fails_when_request_is_missing() {
        let repo = Arc::new(MockRequestRepository::empty());
        let handler = DeleteCancellationRequestHandler::new(repo);

        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(CancellationError::RequestNotFound(_))));
    }

    #[tokio::test]
    async fn delete_twice_fails_the_second_time() {
        let repo = Arc::new(MockRequestRepository::with_request(pending_request()));
        let handler = DeleteCancellationRequestHandler::new(repo);

        handler.handle(command()).await.unwrap();
        let second = handler.handle(command()).await;

        assert!(matches!(second, Err(CancellationError::RequestNotFound(_))));
    }

    #[tokio::test]
    async fn refuses_to_delete_a_confirmed_request() {
        let mut request = pending_request();
        request.confirm(Timestamp::now()).unwrap();
        let repo = Arc::new(MockRequestRepository::with_request(request));
        let handler = DeleteCancellationRequestHandler::new(repo.clone());

        let result = handler.handle(command()).await;

        assert!(matches!(
            result,
            Err(CancellationError::AlreadyProcessed { .. })
        ));
        // Still stored
        assert_eq!(repo.stored().len(), 1);
    }
}
