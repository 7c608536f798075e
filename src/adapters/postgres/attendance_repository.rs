//! PostgreSQL implementation of AttendanceRepository.
//!
//! Capacity-checked joins lock the session row with `FOR UPDATE`, so the
//! extra-attendee count and the insert see no interleaved join.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{row_to_attendance, row_to_session, ATTENDANCE_COLUMNS};
use crate::domain::attendance::{AttendanceStatus, SessionAttendance};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::domain::session::{ExtraCapacity, MentoringSession};
use crate::ports::{AttendanceRepository, AttendanceSummary};

/// PostgreSQL implementation of AttendanceRepository.
#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn session_not_found(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("session_id", id.to_string())
}

fn already_registered() -> DomainError {
    DomainError::new(
        ErrorCode::AlreadyRegistered,
        "Already registered for this session",
    )
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn register(
        &self,
        attendance: &SessionAttendance,
        capacity: Option<ExtraCapacity>,
    ) -> Result<(), DomainError> {
        let session_id = attendance.session_id();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        // 1. Serialize joins on this session
        let locked = sqlx::query("SELECT id FROM sessions WHERE id = $1 FOR UPDATE")
            .bind(session_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock session", e))?;
        if locked.is_none() {
            return Err(session_not_found(session_id));
        }

        // 2. Reject duplicates before spending capacity
        let existing: Option<(uuid::Uuid,)> = sqlx::query_as(
            "SELECT id FROM session_attendances WHERE session_id = $1 AND user_id = $2",
        )
        .bind(session_id.as_uuid())
        .bind(attendance.user_id().as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to check registration", e))?;
        if existing.is_some() {
            return Err(already_registered());
        }

        // 3. Count attendees from outside the group; no group counts as outside
        if let Some(capacity) = capacity {
            let (extra,): (i64,) = sqlx::query_as(
                r#"
                SELECT COUNT(*)
                FROM session_attendances a
                LEFT JOIN users u ON u.id = a.user_id
                WHERE a.session_id = $1
                  AND u.mentee_group_id IS DISTINCT FROM $2
                "#,
            )
            .bind(session_id.as_uuid())
            .bind(capacity.group_id().as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to count extra attendees", e))?;

            capacity.admit(extra as u32)?;
        }

        // 4. Insert
        let inserted = sqlx::query(
            r#"
            INSERT INTO session_attendances (id, session_id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(attendance.id().as_uuid())
        .bind(session_id.as_uuid())
        .bind(attendance.user_id().as_str())
        .bind(attendance.status().as_str())
        .bind(attendance.created_at().as_datetime())
        .bind(attendance.updated_at().as_datetime())
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(already_registered());
            }
            Err(e) => return Err(DomainError::database("Failed to insert attendance", e)),
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn upsert_status(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        status: AttendanceStatus,
    ) -> Result<SessionAttendance, DomainError> {
        let candidate = SessionAttendance::new(*session_id, user_id.clone(), status);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO session_attendances (id, session_id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (session_id, user_id) DO UPDATE SET
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            ATTENDANCE_COLUMNS
        ))
        .bind(candidate.id().as_uuid())
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .bind(status.as_str())
        .bind(candidate.created_at().as_datetime())
        .bind(candidate.updated_at().as_datetime())
        .fetch_one(&self.pool)
        .await;

        match row {
            Ok(row) => row_to_attendance(&row, ""),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                if db_err.constraint() == Some("fk_attendance_user") {
                    Err(DomainError::new(
                        ErrorCode::UserNotFound,
                        format!("User not found: {}", user_id),
                    )
                    .with_detail("user_id", user_id.as_str()))
                } else {
                    Err(session_not_found(session_id))
                }
            }
            Err(e) => Err(DomainError::database("Failed to upsert attendance", e)),
        }
    }

    async fn find(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Option<SessionAttendance>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM session_attendances WHERE session_id = $1 AND user_id = $2",
            ATTENDANCE_COLUMNS
        ))
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch attendance", e))?;

        row.map(|r| row_to_attendance(&r, "")).transpose()
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<SessionAttendance>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM session_attendances WHERE session_id = $1 ORDER BY created_at, user_id",
            ATTENDANCE_COLUMNS
        ))
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list attendances", e))?;

        rows.iter().map(|r| row_to_attendance(r, "")).collect()
    }

    async fn count_for_session(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM session_attendances WHERE session_id = $1")
                .bind(session_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to count attendances", e))?;

        Ok(count as u32)
    }

    async fn summarize_for_user(
        &self,
        session_ids: &[SessionId],
        user_id: &UserId,
    ) -> Result<HashMap<SessionId, AttendanceSummary>, DomainError> {
        let mut summaries: HashMap<SessionId, AttendanceSummary> = session_ids
            .iter()
            .map(|id| (*id, AttendanceSummary::default()))
            .collect();
        if session_ids.is_empty() {
            return Ok(summaries);
        }
        let raw: Vec<uuid::Uuid> = session_ids.iter().map(|id| *id.as_uuid()).collect();

        let counts: Vec<(uuid::Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT session_id, COUNT(*)
            FROM session_attendances
            WHERE session_id = ANY($1)
            GROUP BY session_id
            "#,
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to count attendances", e))?;

        for (session_id, count) in counts {
            if let Some(summary) = summaries.get_mut(&SessionId::from_uuid(session_id)) {
                summary.count = count as u32;
            }
        }

        let own = sqlx::query(&format!(
            "SELECT {} FROM session_attendances WHERE session_id = ANY($1) AND user_id = $2",
            ATTENDANCE_COLUMNS
        ))
        .bind(&raw)
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch attendances", e))?;

        for row in &own {
            let attendance = row_to_attendance(row, "")?;
            if let Some(summary) = summaries.get_mut(attendance.session_id()) {
                summary.mine = Some(attendance);
            }
        }

        Ok(summaries)
    }

    async fn list_upcoming_for_user(
        &self,
        user_id: &UserId,
        from: Timestamp,
    ) -> Result<Vec<(SessionAttendance, MentoringSession)>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.title, s.description, s.date, s.start_time, s.end_time,
                   s.location, s.is_public, s.category, s.max_capacity, s.mentor_id,
                   s.group_id, s.created_at, s.updated_at,
                   a.id AS attendance_id,
                   a.session_id AS attendance_session_id,
                   a.user_id AS attendance_user_id,
                   a.status AS attendance_status,
                   a.created_at AS attendance_created_at,
                   a.updated_at AS attendance_updated_at
            FROM session_attendances a
            JOIN sessions s ON s.id = a.session_id
            WHERE a.user_id = $1 AND s.date >= $2
            ORDER BY s.date
            "#,
        )
        .bind(user_id.as_str())
        .bind(from.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch upcoming sessions", e))?;

        rows.iter()
            .map(|row| Ok((row_to_attendance(row, "attendance_")?, row_to_session(row)?)))
            .collect()
    }
}
