//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{column, row_to_user, USER_COLUMNS};
use crate::domain::calendar::CalendarToken;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        .with_detail("user_id", id.as_str())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, role, email, first_name, last_name, upi, mentee_group_id, calendar_token
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                role = EXCLUDED.role,
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                upi = EXCLUDED.upi,
                mentee_group_id = EXCLUDED.mentee_group_id,
                calendar_token = EXCLUDED.calendar_token
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.role().as_str())
        .bind(user.email())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.upi())
        .bind(user.mentee_group_id().map(|g| *g.as_uuid()))
        .bind(user.calendar_token().map(CalendarToken::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save user", e))?;

        Ok(())
    }

    async fn insert_if_absent(&self, user: &User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, role, email, first_name, last_name, upi, mentee_group_id, calendar_token
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.role().as_str())
        .bind(user.email())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.upi())
        .bind(user.mentee_group_id().map(|g| *g.as_uuid()))
        .bind(user.calendar_token().map(CalendarToken::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to provision user", e))?;

        self.find_by_id(user.id())
            .await?
            .ok_or_else(|| user_not_found(user.id()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();

        let rows = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = ANY($1) ORDER BY id",
            USER_COLUMNS
        ))
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch users", e))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn ensure_calendar_token(
        &self,
        id: &UserId,
        candidate: &CalendarToken,
    ) -> Result<CalendarToken, DomainError> {
        // COALESCE keeps a concurrently stored token instead of overwriting it.
        let row = sqlx::query(
            r#"
            UPDATE users SET calendar_token = COALESCE(calendar_token, $2)
            WHERE id = $1
            RETURNING calendar_token
            "#,
        )
        .bind(id.as_str())
        .bind(candidate.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to store calendar token", e))?;

        let row = row.ok_or_else(|| user_not_found(id))?;
        let stored: String = column(&row, "calendar_token")?;
        Ok(CalendarToken::from_stored(stored))
    }

    async fn replace_calendar_token(
        &self,
        id: &UserId,
        token: &CalendarToken,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET calendar_token = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to rotate calendar token", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }
}
