//! PostgreSQL implementation of BookingStore.
//!
//! Bookings are read together with the player's email and the complex
//! owner's email so the notification fan-out needs no extra queries.

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, Money, Timestamp, UserId};
use crate::ports::{Booking, BookingStatus, BookingStore};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the BookingStore port.
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a booking with its contact emails.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i64,
    deposit: i64,
    status: String,
    confirmed_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    schedule_date: Option<NaiveDate>,
    player_email: Option<String>,
    owner_email: Option<String>,
    owner_id: Option<i64>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: BookingId::new(row.id),
            deposit: Money::from_minor(row.deposit),
            status: parse_status(&row.status)?,
            confirmed_at: row.confirmed_at.map(Timestamp::from_datetime),
            created_at: row.created_at.map(Timestamp::from_datetime),
            schedule_date: row.schedule_date,
            player_email: row.player_email,
            owner_email: row.owner_email,
            owner_id: row.owner_id.map(UserId::new),
        })
    }
}

fn parse_status(s: &str) -> Result<BookingStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid booking status value: {}", s),
        )),
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn find(&self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
            SELECT b.id, b.deposit, b.status, b.confirmed_at, b.created_at,
                   b.schedule_date,
                   p.email AS player_email,
                   o.email AS owner_email,
                   fc.owner_id
            FROM bookings b
            LEFT JOIN users p ON p.id = b.user_id
            LEFT JOIN field_complexes fc ON fc.id = b.field_complex_id
            LEFT JOIN users o ON o.id = fc.owner_id
            WHERE b.id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find booking: {}", e))
        })?;

        row.map(Booking::try_from).transpose()
    }

    async fn mark_cancelled(
        &self,
        id: BookingId,
        cancelled_at: Timestamp,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = 'cancelled',
                cancelled_at = $2,
                cancel_reason = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(cancelled_at.as_datetime())
        .bind(&reason)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to cancel booking: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                "Booking not found",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_works_for_all_states() {
        assert_eq!(parse_status("pending").unwrap(), BookingStatus::Pending);
        assert_eq!(parse_status("confirmed").unwrap(), BookingStatus::Confirmed);
        assert_eq!(parse_status("cancelled").unwrap(), BookingStatus::Cancelled);
        assert_eq!(parse_status("CONFIRMED").unwrap(), BookingStatus::Confirmed);
    }

    #[test]
    fn parse_status_rejects_invalid_values() {
        assert!(parse_status("expired").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn row_converts_to_domain_booking() {
        let now = Utc::now();
        let row = BookingRow {
            id: 12,
            deposit: 20_000_000,
            status: "confirmed".to_string(),
            confirmed_at: Some(now),
            created_at: Some(now),
            schedule_date: NaiveDate::from_ymd_opt(2026, 9, 14),
            player_email: Some("player@example.com".to_string()),
            owner_email: Some("owner@example.com".to_string()),
            owner_id: Some(3),
        };

        let booking = Booking::try_from(row).unwrap();
        assert_eq!(booking.id, BookingId::new(12));
        assert_eq!(booking.deposit, Money::from_major(200_000));
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.owner_id, Some(UserId::new(3)));
    }
}
