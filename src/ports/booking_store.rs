//! Booking store port.
//!
//! The booking aggregate lives in another service area; this core only
//! reads the fields the calculator and the notifier need, and writes the
//! cancellation outcome back.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, DomainError, Money, Timestamp, UserId};

/// Read view of a booking as this core sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,

    /// Deposit held against the booking; base for the proration.
    pub deposit: Money,

    pub status: BookingStatus,

    /// When the owner confirmed the booking, if they have.
    pub confirmed_at: Option<Timestamp>,

    /// When the booking was placed. Nullable in legacy rows.
    pub created_at: Option<Timestamp>,

    /// Date the booked slot falls on, for the notification body.
    pub schedule_date: Option<NaiveDate>,

    /// Player contact, if an email is on file.
    pub player_email: Option<String>,

    /// Field-complex owner contact, resolved through the complex's owner id.
    pub owner_email: Option<String>,

    /// The field-complex owner.
    pub owner_id: Option<UserId>,
}

impl Booking {
    /// Reference point for elapsed-time proration.
    ///
    /// Confirmation time, falling back to creation time, falling back to
    /// `now` for rows missing both.
    pub fn reference_time(&self, now: Timestamp) -> Timestamp {
        self.confirmed_at.or(self.created_at).unwrap_or(now)
    }
}

/// Booking status values this core cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Port over the booking storage.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Loads the cancellation-relevant view of a booking.
    async fn find(&self, id: BookingId) -> Result<Option<Booking>, DomainError>;

    /// Marks the booking cancelled, stamping time and reason.
    async fn mark_cancelled(
        &self,
        id: BookingId,
        cancelled_at: Timestamp,
        reason: Option<String>,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(confirmed: Option<Timestamp>, created: Option<Timestamp>) -> Booking {
        Booking {
            id: BookingId::new(1),
            deposit: Money::from_major(200_000),
            status: BookingStatus::Confirmed,
            confirmed_at: confirmed,
            created_at: created,
            schedule_date: None,
            player_email: None,
            owner_email: None,
            owner_id: None,
        }
    }

    #[test]
    fn reference_time_prefers_confirmation() {
        let now = Timestamp::now();
        let confirmed = now.minus_minutes(60);
        let created = now.minus_minutes(120);
        let b = booking(Some(confirmed), Some(created));
        assert_eq!(b.reference_time(now), confirmed);
    }

    #[test]
    fn reference_time_falls_back_to_creation() {
        let now = Timestamp::now();
        let created = now.minus_minutes(120);
        let b = booking(None, Some(created));
        assert_eq!(b.reference_time(now), created);
    }

    #[test]
    fn reference_time_falls_back_to_now() {
        let now = Timestamp::now();
        let b = booking(None, None);
        assert_eq!(b.reference_time(now), now);
    }

    #[test]
    fn booking_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn BookingStore) {}
    }
}
