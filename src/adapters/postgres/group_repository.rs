//! PostgreSQL implementation of GroupRepository.
//!
//! Mentee membership lives on `users.mentee_group_id`. Replacing a group's
//! mentee list locks the group row and the requested users, checks the
//! assignment rules, then rewrites membership in the same transaction.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{column, row_to_group, row_to_user, GROUP_COLUMNS, USER_COLUMNS};
use crate::domain::foundation::{DomainError, ErrorCode, GroupId, UserId};
use crate::domain::group::{check_mentee_assignment, check_mentor_assignment, Group};
use crate::domain::user::User;
use crate::ports::GroupRepository;

/// PostgreSQL implementation of GroupRepository.
#[derive(Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn group_not_found(id: &GroupId) -> DomainError {
    DomainError::new(ErrorCode::GroupNotFound, format!("Group not found: {}", id))
        .with_detail("group_id", id.to_string())
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn create_next(&self, id: GroupId) -> Result<Group, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        // Serializes numbering between concurrent creators; readers are not blocked.
        sqlx::query("LOCK TABLE groups IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock groups", e))?;

        let highest: (Option<i32>,) = sqlx::query_as("SELECT MAX(group_number) FROM groups")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to read group numbers", e))?;

        let group = Group::new(id, Group::next_number(highest.0.map(|n| n as u32)));

        sqlx::query(
            r#"
            INSERT INTO groups (id, group_number, category, mentor_id, info, created_at, updated_at)
            VALUES ($1, $2, $3, NULL, NULL, $4, $5)
            "#,
        )
        .bind(group.id().as_uuid())
        .bind(group.group_number() as i32)
        .bind(group.category().as_str())
        .bind(group.created_at().as_datetime())
        .bind(group.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert group", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(group)
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM groups WHERE id = $1", GROUP_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch group", e))?;

        row.as_ref().map(row_to_group).transpose()
    }

    async fn find_by_mentor(&self, mentor_id: &UserId) -> Result<Option<Group>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM groups WHERE mentor_id = $1",
            GROUP_COLUMNS
        ))
        .bind(mentor_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch group by mentor", e))?;

        row.as_ref().map(row_to_group).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Group>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM groups ORDER BY group_number",
            GROUP_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list groups", e))?;

        rows.iter().map(row_to_group).collect()
    }

    async fn list_mentees(&self, id: &GroupId) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users WHERE mentee_group_id = $1 ORDER BY id",
            USER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list mentees", e))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn update_with_mentees(
        &self,
        group: &Group,
        mentee_ids: &[UserId],
    ) -> Result<(), DomainError> {
        let target = *group.id();
        let mut seen = HashSet::new();
        let requested: Vec<String> = mentee_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .map(|id| id.as_str().to_string())
            .collect();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        // 1. Lock the group row
        let exists = sqlx::query("SELECT id FROM groups WHERE id = $1 FOR UPDATE")
            .bind(target.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock group", e))?;
        if exists.is_none() {
            return Err(group_not_found(&target));
        }

        // 2. Mentor may run at most one group
        if let Some(mentor_id) = group.mentor_id() {
            let mentor = sqlx::query("SELECT id FROM users WHERE id = $1")
                .bind(mentor_id.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to fetch mentor", e))?;
            if mentor.is_none() {
                return Err(DomainError::new(
                    ErrorCode::UserNotFound,
                    format!("User not found: {}", mentor_id),
                )
                .with_detail("user_id", mentor_id.as_str()));
            }

            let other: Option<(uuid::Uuid,)> =
                sqlx::query_as("SELECT id FROM groups WHERE mentor_id = $1 AND id <> $2")
                    .bind(mentor_id.as_str())
                    .bind(target.as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| DomainError::database("Failed to check mentor", e))?;
            check_mentor_assignment(&target, mentor_id, other.map(|(id,)| GroupId::from_uuid(id)))?;
        }

        // 3. Lock requested mentees and check their current groups
        let rows = sqlx::query("SELECT id, mentee_group_id FROM users WHERE id = ANY($1) FOR UPDATE")
            .bind(&requested)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock mentees", e))?;

        let mut current = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = column(row, "id")?;
            let group_id: Option<uuid::Uuid> = column(row, "mentee_group_id")?;
            current.push((id, group_id.map(GroupId::from_uuid)));
        }
        if let Some(missing) = mentee_ids
            .iter()
            .find(|id| !current.iter().any(|(found, _)| found == id.as_str()))
        {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", missing),
            )
            .with_detail("user_id", missing.as_str()));
        }
        check_mentee_assignment(
            &target,
            mentee_ids.iter().filter_map(|id| {
                current
                    .iter()
                    .find(|(found, _)| found == id.as_str())
                    .map(|(_, group)| (id, *group))
            }),
        )?;

        // 4. Rewrite membership
        sqlx::query(
            "UPDATE users SET mentee_group_id = NULL WHERE mentee_group_id = $1 AND NOT (id = ANY($2))",
        )
        .bind(target.as_uuid())
        .bind(&requested)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to remove mentees", e))?;

        sqlx::query("UPDATE users SET mentee_group_id = $1 WHERE id = ANY($2)")
            .bind(target.as_uuid())
            .bind(&requested)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to assign mentees", e))?;

        // 5. Persist group fields
        let updated = sqlx::query(
            r#"
            UPDATE groups SET
                mentor_id = $2,
                category = $3,
                info = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(target.as_uuid())
        .bind(group.mentor_id().map(UserId::as_str))
        .bind(group.category().as_str())
        .bind(group.info())
        .bind(group.updated_at().as_datetime())
        .execute(&mut *tx)
        .await;

        match updated {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(DomainError::new(
                    ErrorCode::MentorAlreadyAssigned,
                    "Mentor already assigned to another group",
                ));
            }
            Err(e) => return Err(DomainError::database("Failed to update group", e)),
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn delete(&self, id: &GroupId) -> Result<(), DomainError> {
        // Foreign keys clear memberships and cascade to sessions and attendances.
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete group", e))?;

        if result.rows_affected() == 0 {
            return Err(group_not_found(id));
        }
        Ok(())
    }
}
