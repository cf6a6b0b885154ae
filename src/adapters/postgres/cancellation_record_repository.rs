//! PostgreSQL implementation of CancellationRecordRepository.
//!
//! Records in `cancellations` are written once at confirmation and never
//! updated; the port has no update operation.

use crate::domain::cancellation::{CancellationRecord, NewCancellationRecord, RequesterRole};
use crate::domain::foundation::{
    BookingId, CancellationId, DomainError, ErrorCode, Money, RequestId, Timestamp, UserId,
};
use crate::ports::CancellationRecordRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the CancellationRecordRepository port.
pub struct PostgresCancellationRecordRepository {
    pool: PgPool,
}

impl PostgresCancellationRecordRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a cancellation record.
#[derive(Debug, sqlx::FromRow)]
struct CancellationRecordRow {
    id: i64,
    booking_id: i64,
    request_id: i64,
    cancelled_by: String,
    cancel_reason: Option<String>,
    refund_amount: i64,
    penalty_amount: i64,
    created_at: DateTime<Utc>,
    verified_by: i64,
    verified_at: DateTime<Utc>,
}

impl TryFrom<CancellationRecordRow> for CancellationRecord {
    type Error = DomainError;

    fn try_from(row: CancellationRecordRow) -> Result<Self, Self::Error> {
        Ok(CancellationRecord {
            id: CancellationId::new(row.id),
            booking_id: BookingId::new(row.booking_id),
            request_id: RequestId::new(row.request_id),
            cancelled_by: parse_role(&row.cancelled_by)?,
            cancel_reason: row.cancel_reason,
            refund_amount: Money::from_minor(row.refund_amount),
            penalty_amount: Money::from_minor(row.penalty_amount),
            created_at: Timestamp::from_datetime(row.created_at),
            verified_by: UserId::new(row.verified_by),
            verified_at: Timestamp::from_datetime(row.verified_at),
        })
    }
}

fn parse_role(s: &str) -> Result<RequesterRole, DomainError> {
    match s.to_lowercase().as_str() {
        "player" => Ok(RequesterRole::Player),
        "owner" => Ok(RequesterRole::Owner),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid cancelled_by value: {}", s),
        )),
    }
}

const SELECT_COLUMNS: &str = "id, booking_id, request_id, cancelled_by, cancel_reason, \
     refund_amount, penalty_amount, created_at, verified_by, verified_at";

#[async_trait]
impl CancellationRecordRepository for PostgresCancellationRecordRepository {
    async fn insert(
        &self,
        record: NewCancellationRecord,
    ) -> Result<CancellationRecord, DomainError> {
        let row: CancellationRecordRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO cancellations (
                booking_id, request_id, cancelled_by, cancel_reason,
                refund_amount, penalty_amount, created_at, verified_by, verified_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(record.booking_id.as_i64())
        .bind(record.request_id.as_i64())
        .bind(record.cancelled_by.as_str())
        .bind(&record.cancel_reason)
        .bind(record.refund_amount.as_minor())
        .bind(record.penalty_amount.as_minor())
        .bind(record.created_at.as_datetime())
        .bind(record.verified_by.as_i64())
        .bind(record.verified_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert cancellation record: {}", e),
            )
        })?;

        CancellationRecord::try_from(row)
    }

    async fn find_by_id(
        &self,
        id: CancellationId,
    ) -> Result<Option<CancellationRecord>, DomainError> {
        let row: Option<CancellationRecordRow> = sqlx::query_as(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM cancellations
            WHERE id = $1
            "#
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find cancellation record: {}", e),
            )
        })?;

        row.map(CancellationRecord::try_from).transpose()
    }
}
