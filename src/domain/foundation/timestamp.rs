//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Negative if `other` is after `self`.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Fractional hours elapsed since `other`, clamped to zero.
    ///
    /// A reference timestamp in the future counts as zero elapsed time.
    pub fn hours_since(&self, other: &Timestamp) -> f64 {
        let hours = self.duration_since(other).num_seconds() as f64 / 3600.0;
        hours.max(0.0)
    }

    /// Creates a new timestamp by adding the specified number of minutes.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Creates a new timestamp by subtracting the specified number of minutes.
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 - Duration::minutes(minutes))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_between_before_and_after() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn hours_since_is_fractional() {
        let now = Timestamp::now();
        let earlier = now.minus_minutes(165); // 2.75h
        assert!((now.hours_since(&earlier) - 2.75).abs() < 1e-9);
    }

    #[test]
    fn hours_since_clamps_future_reference_to_zero() {
        let now = Timestamp::now();
        let future = now.plus_minutes(30);
        assert_eq!(now.hours_since(&future), 0.0);
    }

    #[test]
    fn plus_and_minus_minutes_are_inverse() {
        let ts = Timestamp::now();
        assert_eq!(ts.plus_minutes(5).minus_minutes(5), ts);
    }

    #[test]
    fn is_after_compares_strictly() {
        let ts = Timestamp::now();
        let later = ts.plus_minutes(1);
        assert!(later.is_after(&ts));
        assert!(!ts.is_after(&ts));
    }
}
