//! GetCancellationRequestHandler - read a single request by id.

use std::sync::Arc;

use crate::domain::cancellation::{CancellationError, CancellationRequest};
use crate::domain::foundation::{RequestId, Timestamp};
use crate::ports::CancellationRequestRepository;

/// Query for a single cancellation request.
#[derive(Debug, Clone)]
pub struct GetCancellationRequestQuery {
    pub request_id: RequestId,
}

/// A request together with its advisory undo-window state.
#[derive(Debug, Clone)]
pub struct GetCancellationRequestResult {
    pub request: CancellationRequest,
    pub undo_window_open: bool,
}

/// Handler for fetching a cancellation request.
pub struct GetCancellationRequestHandler {
    request_repository: Arc<dyn CancellationRequestRepository>,
}

impl GetCancellationRequestHandler {
    pub fn new(request_repository: Arc<dyn CancellationRequestRepository>) -> Self {
        Self { request_repository }
    }

    pub async fn handle(
        &self,
        query: GetCancellationRequestQuery,
    ) -> Result<GetCancellationRequestResult, CancellationError> {
        let request = self
            .request_repository
            .find_by_id(query.request_id)
            .await?
            .ok_or_else(|| CancellationError::request_not_found(query.request_id))?;

        let undo_window_open = request.undo_window_open(Timestamp::now());

        Ok(GetCancellationRequestResult {
            request,
            undo_window_open,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cancellation::{
        NewCancellationRequest, Proration, RequesterRole,
    };
    use crate::domain::foundation::{BookingId, DomainError, Money, UserId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockRequestRepository {
        requests: Mutex<Vec<CancellationRequest>>,
    }

    impl MockRequestRepository {
        fn with_requests(requests: Vec<CancellationRequest>) -> Self {
            Self {
                requests: Mutex::new(requests),
            }
        }
    }

    #[async_trait]
    impl CancellationRequestRepository for MockRequestRepository {
        async fn insert(
            &self,
            _request: NewCancellationRequest,
        ) -> Result<CancellationRequest, DomainError> {
            unreachable!("read-only handler")
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
            Ok(self.requests.lock().unwrap().clone())
        }

        async fn delete(&self, _id: RequestId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn request_with_id(id: i64, requested_at: Timestamp) -> CancellationRequest {
        let proration =
            Proration::compute(RequesterRole::Player, Money::from_major(200_000), 1.0);
        let new = NewCancellationRequest::open(
            BookingId::new(12),
            UserId::new(7),
            RequesterRole::Player,
            None,
            &proration,
            requested_at,
        );
        CancellationRequest {
            id: RequestId::new(id),
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

    #[tokio::test]
    async fn returns_the_request_with_an_open_undo_window() {
        let repo = Arc::new(MockRequestRepository::with_requests(vec![request_with_id(
            5,
            Timestamp::now(),
        )]));
        let handler = GetCancellationRequestHandler::new(repo);

        let result = handler
            .handle(GetCancellationRequestQuery {
                request_id: RequestId::new(5),
            })
            .await
            .unwrap();

        assert_eq!(result.request.id, RequestId::new(5));
        assert!(result.undo_window_open);
    }

    #[tokio::test]
    async fn undo_window_is_closed_after_the_grace_period() {
        let repo = Arc::new(MockRequestRepository::with_requests(vec![request_with_id(
            5,
            Timestamp::now().minus_minutes(10),
        )]));
        let handler = GetCancellationRequestHandler::new(repo);

        let result = handler
            .handle(GetCancellationRequestQuery {
                request_id: RequestId::new(5),
            })
            .await
            .unwrap();

        assert!(!result.undo_window_open);
    }

    #[tokio::test]
    async fn fails_when_request_is_missing() {
        let repo = Arc::new(MockRequestRepository::with_requests(Vec::new()));
        let handler = GetCancellationRequestHandler::new(repo);

        let result = handler
            .handle(GetCancellationRequestQuery {
                request_id: RequestId::new(404),
            })
            .await;

        assert!(matches!(result, Err(CancellationError::RequestNotFound(_))));
    }
}
