//! Cancellation domain: proration arithmetic and the request lifecycle.

mod errors;
mod proration;
mod record;
mod request;
mod role;
mod status;

pub use errors::CancellationError;
pub use proration::{
    prorate, Proration, FREE_CANCEL_WINDOW_HOURS, OWNER_REFUND_CEILING, RATE_PER_EXTRA_HOUR,
};
pub use record::{CancellationRecord, NewCancellationRecord};
pub use request::{CancellationRequest, NewCancellationRequest, UNDO_GRACE_MINUTES};
pub use role::RequesterRole;
pub use status::RequestStatus;
