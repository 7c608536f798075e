//! Group aggregate.
//!
//! A group has at most one mentor and any number of mentees. Mentee
//! membership is recorded on the user (`mentee_group_id`), so the aggregate
//! itself only carries the mentor assignment.

use serde::{Deserialize, Serialize};

use super::Category;
use crate::domain::foundation::{Authorizable, DomainError, GroupId, Timestamp, UserId};

/// Maximum length for the free-text info field.
pub const MAX_INFO_LENGTH: usize = 2000;

/// Mentor group.
///
/// # Invariants
///
/// - `group_number` is unique and never reused within a deployment
/// - `mentor_id` is unique across groups (enforced by the repository)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    group_number: u32,
    category: Category,
    mentor_id: Option<UserId>,
    info: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Group {
    /// Creates an empty group with the default category.
    pub fn new(id: GroupId, group_number: u32) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            group_number,
            category: Category::default(),
            mentor_id: None,
            info: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a group from persistence (no validation).
    pub fn reconstitute(
        id: GroupId,
        group_number: u32,
        category: Category,
        mentor_id: Option<UserId>,
        info: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            group_number,
            category,
            mentor_id,
            info,
            created_at,
            updated_at,
        }
    }

    /// The group number that follows the highest existing one.
    pub fn next_number(highest: Option<u32>) -> u32 {
        highest.map(|n| n + 1).unwrap_or(1)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn group_number(&self) -> u32 {
        self.group_number
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn mentor_id(&self) -> Option<&UserId> {
        self.mentor_id.as_ref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Human label used in calendar categories ("Group 3").
    pub fn label(&self) -> String {
        format!("Group {}", self.group_number)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the mentor, category and info in one step.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if info exceeds [`MAX_INFO_LENGTH`]
    pub fn reassign(
        &mut self,
        mentor_id: Option<UserId>,
        category: Category,
        info: Option<String>,
    ) -> Result<(), DomainError> {
        let info = info.filter(|s| !s.trim().is_empty());
        if let Some(text) = &info {
            if text.chars().count() > MAX_INFO_LENGTH {
                return Err(DomainError::validation(
                    "info",
                    format!("Info cannot exceed {} characters", MAX_INFO_LENGTH),
                ));
            }
        }

        self.mentor_id = mentor_id;
        self.category = category;
        self.info = info;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl Authorizable for Group {
    const RESOURCE_TYPE: &'static str = "Group";

    fn resource_id(&self) -> String {
        self.id.to_string()
    }
}
