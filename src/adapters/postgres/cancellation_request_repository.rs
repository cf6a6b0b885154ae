//! PostgreSQL implementation of CancellationRequestRepository.
//!
//! Requests live in `cancellation_requests`; money columns hold minor
//! units as BIGINT. The update guards on `status = 'pending'` so a
//! request that was confirmed concurrently can never be overwritten.

use crate::domain::cancellation::{
    CancellationRequest, NewCancellationRequest, RequestStatus, RequesterRole,
};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, Money, RequestId, Timestamp, UserId,
};
use crate::ports::CancellationRequestRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the CancellationRequestRepository port.
pub struct PostgresCancellationRequestRepository {
    pool: PgPool,
}

impl PostgresCancellationRequestRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a cancellation request.
#[derive(Debug, sqlx::FromRow)]
struct CancellationRequestRow {
    id: i64,
    booking_id: i64,
    requested_by: i64,
    requested_role: String,
    user_reason: Option<String>,
    refund_qr_url: Option<String>,
    requested_at: DateTime<Utc>,
    status: String,
    refund_amount: i64,
    penalty_amount: i64,
    final_refund_amount: i64,
    undo_allowed_until: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl TryFrom<CancellationRequestRow> for CancellationRequest {
    type Error = DomainError;

    fn try_from(row: CancellationRequestRow) -> Result<Self, Self::Error> {
        Ok(CancellationRequest {
            id: RequestId::new(row.id),
            booking_id: BookingId::new(row.booking_id),
            requested_by: UserId::new(row.requested_by),
            requested_role: parse_role(&row.requested_role)?,
            user_reason: row.user_reason,
            refund_qr_url: row.refund_qr_url,
            requested_at: Timestamp::from_datetime(row.requested_at),
            status: parse_status(&row.status)?,
            refund_amount: Money::from_minor(row.refund_amount),
            penalty_amount: Money::from_minor(row.penalty_amount),
            final_refund_amount: Money::from_minor(row.final_refund_amount),
            undo_allowed_until: Timestamp::from_datetime(row.undo_allowed_until),
            processed_at: row.processed_at.map(Timestamp::from_datetime),
        })
    }
}

fn parse_role(s: &str) -> Result<RequesterRole, DomainError> {
    match s.to_lowercase().as_str() {
        "player" => Ok(RequesterRole::Player),
        "owner" => Ok(RequesterRole::Owner),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid requested_role value: {}", s),
        )),
    }
}

fn parse_status(s: &str) -> Result<RequestStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(RequestStatus::Pending),
        "confirmed" => Ok(RequestStatus::Confirmed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: &RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "pending",
        RequestStatus::Confirmed => "confirmed",
    }
}

const SELECT_COLUMNS: &str = "id, booking_id, requested_by, requested_role, user_reason, \
     refund_qr_url, requested_at, status, refund_amount, penalty_amount, \
     final_refund_amount, undo_allowed_until, processed_at";

#[async_trait]
impl CancellationRequestRepository for PostgresCancellationRequestRepository {
    async fn insert(
        &self,
        request: NewCancellationRequest,
    ) -> Result<CancellationRequest, DomainError> {
        let row: CancellationRequestRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO cancellation_requests (
                booking_id, requested_by, requested_role, user_reason,
                requested_at, status, refund_amount, penalty_amount,
                final_refund_amount, undo_allowed_until
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(request.booking_id.as_i64())
        .bind(request.requested_by.as_i64())
        .bind(request.requested_role.as_str())
        .bind(&request.user_reason)
        .bind(request.requested_at.as_datetime())
        .bind(status_to_string(&request.status))
        .bind(request.refund_amount.as_minor())
        .bind(request.penalty_amount.as_minor())
        .bind(request.final_refund_amount.as_minor())
        .bind(request.undo_allowed_until.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert cancellation request: {}", e),
            )
        })?;

        CancellationRequest::try_from(row)
    }

    async fn update(&self, request: &CancellationRequest) -> Result<(), DomainError> {
        // Only pending rows may change; a concurrently processed request
        // surfaces as an invalid-state error instead of a silent overwrite.
        let result = sqlx::query(
            r#"
            UPDATE cancellation_requests SET
                user_reason = $2,
                refund_qr_url = $3,
                status = $4,
                processed_at = $5
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request.id.as_i64())
        .bind(&request.user_reason)
        .bind(&request.refund_qr_url)
        .bind(status_to_string(&request.status))
        .bind(request.processed_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update cancellation request: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cancellation request {} is not pending", request.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: RequestId) -> Result<Option<CancellationRequest>, DomainError> {
        let row: Option<CancellationRequestRow> = sqlx::query_as(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM cancellation_requests
            WHERE id = $1
            "#
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find cancellation request: {}", e),
            )
        })?;

        row.map(CancellationRequest::try_from).transpose()
    }

    async fn find_pending_by_booking(
        &self,
        booking: BookingId,
    ) -> Result<Option<CancellationRequest>, DomainError> {
        let row: Option<CancellationRequestRow> = sqlx::query_as(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM cancellation_requests
            WHERE booking_id = $1 AND status = 'pending'
            "#
        ))
        .bind(booking.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find pending cancellation request: {}", e),
            )
        })?;

        row.map(CancellationRequest::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<CancellationRequest>, DomainError> {
        let rows: Vec<CancellationRequestRow> = sqlx::query_as(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM cancellation_requests
            ORDER BY requested_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list cancellation requests: {}", e),
            )
        })?;

        rows.into_iter().map(CancellationRequest::try_from).collect()
    }

    async fn delete(&self, id: RequestId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM cancellation_requests WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete cancellation request: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RequestNotFound,
                "Cancellation request not found",
            ));
        }

        Ok(())
    }
}
