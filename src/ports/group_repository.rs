//! Group repository port.
//!
//! Mentee membership is stored on users, so group writes that touch
//! membership are compound operations and must be atomic.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GroupId, UserId};
use crate::domain::group::Group;
use crate::domain::user::User;

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Create a group numbered one past the current highest number.
    ///
    /// Number allocation and insert happen atomically.
    async fn create_next(&self, id: GroupId) -> Result<Group, DomainError>;

    /// Find a group by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError>;

    /// Find the group the user mentors, if any.
    async fn find_by_mentor(&self, mentor_id: &UserId) -> Result<Option<Group>, DomainError>;

    /// All groups ordered by group number ascending.
    async fn list_all(&self) -> Result<Vec<Group>, DomainError>;

    /// Current mentees of a group.
    async fn list_mentees(&self, id: &GroupId) -> Result<Vec<User>, DomainError>;

    /// Persist the group's mentor, category and info, and replace its mentee
    /// set with exactly `mentee_ids`.
    ///
    /// Users dropped from the list become group-less.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` if the group doesn't exist
    /// - `UserNotFound` if a mentee or the mentor doesn't exist
    /// - `MenteeAlreadyAssigned` if a listed user is mentee of another group
    /// - `MentorAlreadyAssigned` if the mentor already mentors another group
    async fn update_with_mentees(
        &self,
        group: &Group,
        mentee_ids: &[UserId],
    ) -> Result<(), DomainError>;

    /// Delete a group. Its mentees become group-less and its sessions (with
    /// their attendances) are deleted.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` if the group doesn't exist
    async fn delete(&self, id: &GroupId) -> Result<(), DomainError>;
}
