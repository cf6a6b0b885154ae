//! Cancellation request handlers.

mod confirm_request;
mod create_request;
mod delete_request;
mod get_request;
mod list_requests;
mod notifications;

pub use confirm_request::{
    ConfirmCancellationCommand, ConfirmCancellationHandler, ConfirmCancellationResult,
};
pub use create_request::{
    CreateCancellationRequestCommand, CreateCancellationRequestHandler,
    CreateCancellationRequestResult,
};
pub use delete_request::{
    DeleteCancellationRequestCommand, DeleteCancellationRequestHandler,
    DeleteCancellationRequestResult,
};
pub use get_request::{
    GetCancellationRequestHandler, GetCancellationRequestQuery, GetCancellationRequestResult,
};
pub use list_requests::{ListCancellationRequestsHandler, ListCancellationRequestsResult};
pub use notifications::{cancellation_notice, CancellationNotice};
