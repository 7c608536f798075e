//! Session repository port.
//!
//! Defines the contract for persisting mentoring sessions. Creation and
//! deletion are compound operations (auto-enrollment, cascade) and must be
//! atomic in every implementation.

use async_trait::async_trait;

use crate::domain::attendance::SessionAttendance;
use crate::domain::foundation::{DomainError, GroupId, SessionId, UserId};
use crate::domain::session::MentoringSession;

/// Selects the sessions a student-view listing may show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSessions {
    /// Include private sessions of this group.
    pub group_id: Option<GroupId>,
    /// Include private sessions run by this mentor.
    pub mentor_id: Option<UserId>,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a session and a `REGISTERED` attendance for every current
    /// mentee of its group, atomically.
    ///
    /// Returns the created attendances.
    async fn create_with_enrollment(
        &self,
        session: &MentoringSession,
    ) -> Result<Vec<SessionAttendance>, DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    async fn update(&self, session: &MentoringSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentoringSession>, DomainError>;

    /// Sessions run by a mentor, ordered by date ascending.
    async fn list_by_mentor(&self, mentor_id: &UserId)
        -> Result<Vec<MentoringSession>, DomainError>;

    /// Public sessions plus those matched by `filter`, ordered by date ascending.
    async fn list_visible(
        &self,
        filter: &VisibleSessions,
    ) -> Result<Vec<MentoringSession>, DomainError>;

    /// Delete a session and all its attendances.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SessionRepository) {}
    }

    #[test]
    fn default_filter_selects_only_public_sessions() {
        let filter = VisibleSessions::default();
        assert!(filter.group_id.is_none());
        assert!(filter.mentor_id.is_none());
    }
}
