//! HTTP handlers for cancellation endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::cancellation::{
    ConfirmCancellationCommand, ConfirmCancellationHandler, CreateCancellationRequestCommand,
    CreateCancellationRequestHandler, DeleteCancellationRequestCommand,
    DeleteCancellationRequestHandler, GetCancellationRequestHandler, GetCancellationRequestQuery,
    ListCancellationRequestsHandler,
};
use crate::domain::cancellation::CancellationError;
use crate::domain::foundation::{BookingId, RequestId, UserId};
use crate::ports::{
    BookingStore, CancellationRecordRepository, CancellationRequestRepository, Mailer,
    RefundQrProvider, RoleDirectory,
};

use super::dto::{
    CancellationRequestResponse, ConfirmCancellationResponse, CreateCancellationRequest,
    CreateCancellationResponse, ErrorResponse, GetCancellationResponse, ListCancellationResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; the Arc-wrapped ports are shared.
#[derive(Clone)]
pub struct CancellationAppState {
    pub booking_store: Arc<dyn BookingStore>,
    pub role_directory: Arc<dyn RoleDirectory>,
    pub request_repository: Arc<dyn CancellationRequestRepository>,
    pub record_repository: Arc<dyn CancellationRecordRepository>,
    pub qr_provider: Arc<dyn RefundQrProvider>,
    pub mailer: Arc<dyn Mailer>,
}

impl CancellationAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_handler(&self) -> CreateCancellationRequestHandler {
        CreateCancellationRequestHandler::new(
            self.booking_store.clone(),
            self.role_directory.clone(),
            self.request_repository.clone(),
            self.qr_provider.clone(),
            self.mailer.clone(),
        )
    }

    pub fn confirm_handler(&self) -> ConfirmCancellationHandler {
        ConfirmCancellationHandler::new(
            self.request_repository.clone(),
            self.record_repository.clone(),
            self.booking_store.clone(),
        )
    }

    pub fn delete_handler(&self) -> DeleteCancellationRequestHandler {
        DeleteCancellationRequestHandler::new(self.request_repository.clone())
    }

    pub fn get_handler(&self) -> GetCancellationRequestHandler {
        GetCancellationRequestHandler::new(self.request_repository.clone())
    }

    pub fn list_handler(&self) -> ListCancellationRequestsHandler {
        ListCancellationRequestsHandler::new(self.request_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context (would come from auth middleware in production)
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from the request.
///
/// In production this would be extracted from a JWT/session by auth
/// middleware. For now, an X-User-Id header carries the user id.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<UserId>().ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/cancellation-requests - Open a cancellation request
pub async fn create_cancellation_request(
    State(state): State<CancellationAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateCancellationRequest>,
) -> Result<impl IntoResponse, CancellationApiError> {
    let handler = state.create_handler();
    let cmd = CreateCancellationRequestCommand {
        booking_id: BookingId::new(request.booking_id),
        requested_by: user.user_id,
        reason: request.reason,
    };

    let result = handler.handle(cmd).await?;

    let response = CreateCancellationResponse::from(result);
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/cancellation-requests/:id/confirm - Confirm a pending request
pub async fn confirm_cancellation_request(
    State(state): State<CancellationAppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, CancellationApiError> {
    let handler = state.confirm_handler();
    let cmd = ConfirmCancellationCommand {
        request_id: RequestId::new(id),
        verified_by: user.user_id,
    };

    let result = handler.handle(cmd).await?;

    let response = ConfirmCancellationResponse::from(result);
    Ok(Json(response))
}

/// DELETE /api/cancellation-requests/:id - Withdraw a pending request
pub async fn delete_cancellation_request(
    State(state): State<CancellationAppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, CancellationApiError> {
    let handler = state.delete_handler();
    let cmd = DeleteCancellationRequestCommand {
        request_id: RequestId::new(id),
    };

    handler.handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/cancellation-requests/:id - Fetch a single request
pub async fn get_cancellation_request(
    State(state): State<CancellationAppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, CancellationApiError> {
    let handler = state.get_handler();
    let query = GetCancellationRequestQuery {
        request_id: RequestId::new(id),
    };

    let result = handler.handle(query).await?;

    let response = GetCancellationResponse::from(result);
    Ok(Json(response))
}

/// GET /api/cancellation-requests - List requests, newest first
pub async fn list_cancellation_requests(
    State(state): State<CancellationAppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, CancellationApiError> {
    let handler = state.list_handler();
    let result = handler.handle().await?;

    let response = ListCancellationResponse {
        requests: result
            .requests
            .into_iter()
            .map(CancellationRequestResponse::from)
            .collect(),
    };
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
pub struct CancellationApiError(CancellationError);

impl From<CancellationError> for CancellationApiError {
    fn from(err: CancellationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CancellationApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            CancellationError::BookingNotFound(_)
            | CancellationError::RequestNotFound(_)
            | CancellationError::RoleNotFound(_) => StatusCode::NOT_FOUND,
            CancellationError::AlreadyProcessed { .. }
            | CancellationError::RequestAlreadyOpen(_) => StatusCode::CONFLICT,
            CancellationError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            CancellationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cancellation::RequestStatus;
    use axum::body::to_bytes;

    async fn status_and_code(err: CancellationError) -> (StatusCode, String) {
        let response = CancellationApiError(err).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json["error_code"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn not_found_errors_map_to_404() {
        let (status, code) =
            status_and_code(CancellationError::booking_not_found(BookingId::new(5))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "BOOKING_NOT_FOUND");

        let (status, _) =
            status_and_code(CancellationError::request_not_found(RequestId::new(5))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = status_and_code(CancellationError::role_not_found(UserId::new(5))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn state_conflicts_map_to_409() {
        let (status, code) = status_and_code(CancellationError::already_processed(
            RequestId::new(5),
            RequestStatus::Confirmed,
        ))
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "INVALID_STATE_TRANSITION");

        let (status, code) =
            status_and_code(CancellationError::request_already_open(BookingId::new(5))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "REQUEST_ALREADY_OPEN");
    }

    #[tokio::test]
    async fn validation_maps_to_400_and_infrastructure_to_500() {
        let (status, _) =
            status_and_code(CancellationError::validation("reason", "too long")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, code) =
            status_and_code(CancellationError::infrastructure("connection lost")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn error_body_carries_the_localized_message() {
        let response =
            CancellationApiError(CancellationError::booking_not_found(BookingId::new(42)))
                .into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("Không tìm thấy đặt sân"));
    }
}
