//! Cancellation request status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a cancellation request.
///
/// `Pending -> Confirmed` is the only legal transition. A request may also
/// be deleted, but only while `Pending`; deletion is handled at the store,
/// not as a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting staff/owner confirmation.
    Pending,
    /// Finalized; a cancellation record exists and the booking is cancelled.
    Confirmed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Confirmed => "confirmed",
        }
    }
}

impl StateMachine for RequestStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (RequestStatus::Pending, RequestStatus::Confirmed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            RequestStatus::Pending => vec![RequestStatus::Confirmed],
            RequestStatus::Confirmed => vec![],
        }
    }
}
