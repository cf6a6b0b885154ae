//! PostgreSQL implementation of RoleDirectory.
//!
//! Resolves a user's platform role from the `users` table. Roles other
//! than player and owner (staff, admin) resolve to `None`; they cannot
//! open cancellation requests.

use crate::domain::cancellation::RequesterRole;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::RoleDirectory;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the RoleDirectory port.
pub struct PostgresRoleDirectory {
    pool: PgPool,
}

impl PostgresRoleDirectory {
    /// Creates a new directory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleDirectory for PostgresRoleDirectory {
    async fn role_of(&self, user: UserId) -> Result<Option<RequesterRole>, DomainError> {
        let role: Option<(String,)> = sqlx::query_as("SELECT role FROM users WHERE id = $1")
            .bind(user.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to resolve user role: {}", e),
                )
            })?;

        Ok(role.and_then(|(r,)| r.parse::<RequesterRole>().ok()))
    }
}
