//! Cancellation record repository port.

use async_trait::async_trait;

use crate::domain::cancellation::{CancellationRecord, NewCancellationRecord};
use crate::domain::foundation::{CancellationId, DomainError};

/// Port over the immutable cancellation record store.
///
/// Records are written exactly once at confirmation; there is no update.
#[async_trait]
pub trait CancellationRecordRepository: Send + Sync {
    /// Persists a new record and returns it with the assigned id.
    async fn insert(
        &self,
        record: NewCancellationRecord,
    ) -> Result<CancellationRecord, DomainError>;

    async fn find_by_id(
        &self,
        id: CancellationId,
    ) -> Result<Option<CancellationRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CancellationRecordRepository) {}
    }
}
