//! Axum router configuration for cancellation endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    confirm_cancellation_request, create_cancellation_request, delete_cancellation_request,
    get_cancellation_request, list_cancellation_requests, CancellationAppState,
};

/// Create the cancellation API router.
///
/// # Routes
///
/// - `POST /` - Open a cancellation request for a booking
/// - `GET /` - List requests, newest first
/// - `GET /:id` - Fetch a single request
/// - `DELETE /:id` - Withdraw a pending request
/// - `POST /:id/confirm` - Confirm a pending request (staff)
///
/// Mount at `/api/cancellation-requests`:
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api/cancellation-requests", cancellation_routes())
///     .with_state(app_state);
/// ```
pub fn cancellation_routes() -> Router<CancellationAppState> {
    Router::new()
        .route("/", post(create_cancellation_request))
        .route("/", get(list_cancellation_requests))
        .route("/:id", get(get_cancellation_request))
        .route("/:id", delete(delete_cancellation_request))
        .route("/:id/confirm", post(confirm_cancellation_request))
}
