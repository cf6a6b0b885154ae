//! Cancellation request repository port.

use async_trait::async_trait;

use crate::domain::cancellation::{CancellationRequest, NewCancellationRequest};
use crate::domain::foundation::{BookingId, DomainError, RequestId};

/// Port over cancellation request storage.
///
/// Ids are assigned by the store; `insert` returns the persisted request
/// carrying its id so the caller can reference it in side effects.
#[async_trait]
pub trait CancellationRequestRepository: Send + Sync {
    /// Persists a new request and returns it with the assigned id.
    async fn insert(
        &self,
        request: NewCancellationRequest,
    ) -> Result<CancellationRequest, DomainError>;

    /// Persists changes to an existing request.
    ///
    /// Implementations must refuse to touch rows that have left the
    /// `Pending` state, surfacing an invalid-state-transition error.
    async fn update(&self, request: &CancellationRequest) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: RequestId) -> Result<Option<CancellationRequest>, DomainError>;

    /// Finds the open (pending) request for a booking, if any.
    async fn find_pending_by_booking(
        &self,
        booking: BookingId,
    ) -> Result<Option<CancellationRequest>, DomainError>;

    /// Lists all requests, newest first.
    async fn list(&self) -> Result<Vec<CancellationRequest>, DomainError>;

    /// Removes a request permanently.
    async fn delete(&self, id: RequestId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CancellationRequestRepository) {}
    }
}
