//! PostgreSQL implementation of SessionRepository.
//!
//! Persists MentoringSession aggregates. Creation auto-enrolls the owning
//! group's mentees in the same transaction; deletion relies on the
//! `session_attendances` foreign key to cascade.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{column, row_to_session, SESSION_COLUMNS};
use crate::domain::attendance::SessionAttendance;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::session::MentoringSession;
use crate::ports::{SessionRepository, VisibleSessions};

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn session_not_found(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("session_id", id.to_string())
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create_with_enrollment(
        &self,
        session: &MentoringSession,
    ) -> Result<Vec<SessionAttendance>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, title, description, date, start_time, end_time, location,
                is_public, category, max_capacity, mentor_id, group_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.title())
        .bind(session.description())
        .bind(session.date().as_datetime())
        .bind(session.start_time().map(|t| *t.as_datetime()))
        .bind(session.end_time().map(|t| *t.as_datetime()))
        .bind(session.location())
        .bind(session.is_public())
        .bind(session.category().as_str())
        .bind(session.max_capacity().map(|c| c as i32))
        .bind(session.mentor_id().as_str())
        .bind(session.group_id().as_uuid())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert session", e))?;

        let mentee_rows =
            sqlx::query("SELECT id FROM users WHERE mentee_group_id = $1 ORDER BY id FOR SHARE")
                .bind(session.group_id().as_uuid())
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to fetch group mentees", e))?;

        let mut enrolled = Vec::with_capacity(mentee_rows.len());
        for row in &mentee_rows {
            let raw: String = column(row, "id")?;
            let user_id =
                UserId::new(raw).map_err(|e| DomainError::database("Invalid user id", e))?;
            let attendance = SessionAttendance::register(*session.id(), user_id);

            sqlx::query(
                r#"
                INSERT INTO session_attendances (id, session_id, user_id, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(attendance.id().as_uuid())
            .bind(attendance.session_id().as_uuid())
            .bind(attendance.user_id().as_str())
            .bind(attendance.status().as_str())
            .bind(attendance.created_at().as_datetime())
            .bind(attendance.updated_at().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to enroll mentee", e))?;

            enrolled.push(attendance);
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(enrolled)
    }

    async fn update(&self, session: &MentoringSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                title = $2,
                description = $3,
                date = $4,
                start_time = $5,
                end_time = $6,
                location = $7,
                is_public = $8,
                category = $9,
                max_capacity = $10,
                group_id = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.title())
        .bind(session.description())
        .bind(session.date().as_datetime())
        .bind(session.start_time().map(|t| *t.as_datetime()))
        .bind(session.end_time().map(|t| *t.as_datetime()))
        .bind(session.location())
        .bind(session.is_public())
        .bind(session.category().as_str())
        .bind(session.max_capacity().map(|c| c as i32))
        .bind(session.group_id().as_uuid())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update session", e))?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(session.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentoringSession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<MentoringSession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE mentor_id = $1 ORDER BY date, created_at",
            SESSION_COLUMNS
        ))
        .bind(mentor_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch sessions by mentor", e))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn list_visible(
        &self,
        filter: &VisibleSessions,
    ) -> Result<Vec<MentoringSession>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM sessions
            WHERE is_public
               OR ($1::uuid IS NOT NULL AND group_id = $1)
               OR ($2::text IS NOT NULL AND mentor_id = $2)
            ORDER BY date, created_at
            "#,
            SESSION_COLUMNS
        ))
        .bind(filter.group_id.map(|g| *g.as_uuid()))
        .bind(filter.mentor_id.as_ref().map(UserId::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch visible sessions", e))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete session", e))?;

        if result.rows_affected() == 0 {
            return Err(session_not_found(id));
        }

        Ok(())
    }
}
