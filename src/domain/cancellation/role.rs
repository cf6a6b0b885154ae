//! Requester role.
//!
//! A cancellation is always requested by one of two parties, and the
//! proration branch depends on which one. Modeling the role as a closed
//! enum (instead of the free-form role string the directory stores) means
//! an unknown role can never silently fall through to a default branch:
//! resolution fails up front with a role-not-found error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Which party is requesting the cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequesterRole {
    /// The player who placed the booking.
    Player,
    /// The owner of the field complex.
    Owner,
}

impl RequesterRole {
    /// Canonical storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequesterRole::Player => "player",
            RequesterRole::Owner => "owner",
        }
    }

    /// Vietnamese display name used in customer-facing messages.
    pub fn display_vi(&self) -> &'static str {
        match self {
            RequesterRole::Player => "Người đặt sân",
            RequesterRole::Owner => "Chủ sân",
        }
    }
}

impl fmt::Display for RequesterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequesterRole {
    type Err = ValidationError;

    /// Case-insensitive parse of the directory's role string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "player" => Ok(RequesterRole::Player),
            "owner" => Ok(RequesterRole::Owner),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown requester role '{}'", other),
            )),
        }
    }
}
