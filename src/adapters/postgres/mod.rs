//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Users and calendar tokens
//! - `PostgresGroupRepository` - Groups and mentee membership
//! - `PostgresSessionRepository` - Sessions with mentee auto-enrollment
//! - `PostgresAttendanceRepository` - Capacity-checked joins and status upserts
//!
//! Schema lives in `migrations/` and is applied with [`run_migrations`].

mod attendance_repository;
mod group_repository;
mod rows;
mod session_repository;
mod user_repository;

pub use attendance_repository::PostgresAttendanceRepository;
pub use group_repository::PostgresGroupRepository;
pub use session_repository::PostgresSessionRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Applies the bundled schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database("Failed to run migrations", e))
}
