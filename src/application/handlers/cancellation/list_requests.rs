//! ListCancellationRequestsHandler - newest-first listing for staff review.

use std::sync::Arc;

use crate::domain::cancellation::{CancellationError, CancellationRequest};
use crate::ports::CancellationRequestRepository;

/// Result of listing cancellation requests, newest first.
#[derive(Debug, Clone)]
pub struct ListCancellationRequestsResult {
    pub requests: Vec<CancellationRequest>,
}

/// Handler for listing cancellation requests.
pub struct ListCancellationRequestsHandler {
    request_repository: Arc<dyn CancellationRequestRepository>,
}

impl ListCancellationRequestsHandler {
    pub fn new(request_repository: Arc<dyn CancellationRequestRepository>) -> Self {
        Self { request_repository }
    }

    pub async fn handle(&self) -> Result<ListCancellationRequestsResult, CancellationError> {
        let requests = self.request_repository.list().await?;
        Ok(ListCancellationRequestsResult { requests })
    }
}
