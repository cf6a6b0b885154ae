//! Role directory port.
//!
//! Resolves a user id to a requester role. Used once at request creation
//! to pick the proration branch. Users whose stored role is neither player
//! nor owner resolve to `None`.

use async_trait::async_trait;

use crate::domain::cancellation::RequesterRole;
use crate::domain::foundation::{DomainError, UserId};

/// Port over the user/role directory.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Returns the requester role of a user, if resolvable.
    async fn role_of(&self, user: UserId) -> Result<Option<RequesterRole>, DomainError>;
}
