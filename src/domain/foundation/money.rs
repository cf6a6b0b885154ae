//! Money value object.
//!
//! Amounts are an `i64` count of minor units (hundredths of the platform
//! currency), never floats at rest. The two-decimal rounding rule for all
//! stored refund/penalty amounts is therefore exact by construction; the
//! only floating-point arithmetic is the proration multiply, which rounds
//! half-away-from-zero back to a minor-unit count.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A non-negative currency amount in minor units (two decimal places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units (e.g. 20000000 = 200000.00).
    pub fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole currency units.
    pub fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// Creates an amount, rejecting negative values.
    pub fn try_from_minor(minor: i64) -> Result<Self, ValidationError> {
        if minor < 0 {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("amount cannot be negative, got {}", minor),
            ));
        }
        Ok(Self(minor))
    }

    /// Returns the amount in minor units.
    pub fn as_minor(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a float of whole currency units.
    ///
    /// For display and wire formats only.
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Scales the amount by a factor, rounding to the nearest minor unit.
    pub fn scale(&self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round() as i64)
    }

    /// Absolute difference between two amounts.
    pub fn abs_diff(&self, other: Money) -> Self {
        Self((self.0 - other.0).abs())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_major_is_hundred_minor_units() {
        assert_eq!(Money::from_major(200000).as_minor(), 20000000);
    }

    #[test]
    fn try_from_minor_rejects_negative() {
        assert!(Money::try_from_minor(-1).is_err());
        assert!(Money::try_from_minor(0).is_ok());
    }

    #[test]
    fn scale_rounds_to_nearest_minor_unit() {
        // 200000.00 * 0.4 = 80000.00
        assert_eq!(Money::from_major(200000).scale(0.4), Money::from_major(80000));
        // 0.015 * 1 rounds half away from zero
        assert_eq!(Money::from_minor(3).scale(0.5), Money::from_minor(2));
        assert_eq!(Money::from_minor(1).scale(0.5), Money::from_minor(1));
    }

    #[test]
    fn abs_diff_is_symmetric_and_non_negative() {
        let a = Money::from_major(200000);
        let b = Money::from_major(80000);
        assert_eq!(a.abs_diff(b), Money::from_major(120000));
        assert_eq!(b.abs_diff(a), Money::from_major(120000));
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Money::from_minor(20000000).to_string(), "200000.00");
        assert_eq!(Money::from_minor(1205).to_string(), "12.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn serializes_as_minor_units() {
        let json = serde_json::to_string(&Money::from_minor(1500)).unwrap();
        assert_eq!(json, "1500");
    }
}
