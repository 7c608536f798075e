//! Attendance repository port.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::attendance::{AttendanceStatus, SessionAttendance};
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};
use crate::domain::session::{ExtraCapacity, MentoringSession};

/// Attendance totals of one session as seen by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    /// Attendances in any status.
    pub count: u32,
    /// The user's own attendance, if any.
    pub mine: Option<SessionAttendance>,
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Insert a self-join attendance.
    ///
    /// When `capacity` is given, counting the session's extra attendees and
    /// inserting happen as one atomic step, so two concurrent joins can
    /// never both take the last slot.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session no longer exists
    /// - `AlreadyRegistered` if the `(session, user)` pair exists
    /// - `CapacityExceeded` if no extra slot is left
    async fn register(
        &self,
        attendance: &SessionAttendance,
        capacity: Option<ExtraCapacity>,
    ) -> Result<(), DomainError>;

    /// Create the attendance in `status` if absent, else overwrite its status.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn upsert_status(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        status: AttendanceStatus,
    ) -> Result<SessionAttendance, DomainError>;

    /// One user's attendance at one session.
    async fn find(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<Option<SessionAttendance>, DomainError>;

    /// All attendances of a session, oldest first.
    async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<SessionAttendance>, DomainError>;

    /// Number of attendances of a session, in any status.
    async fn count_for_session(&self, session_id: &SessionId) -> Result<u32, DomainError>;

    /// Count and `user_id`'s own attendance for each of `session_ids`, without
    /// a query per session. Every requested session has an entry.
    async fn summarize_for_user(
        &self,
        session_ids: &[SessionId],
        user_id: &UserId,
    ) -> Result<HashMap<SessionId, AttendanceSummary>, DomainError>;

    /// A user's attendances at sessions dated on or after `from`, with the
    /// sessions, ordered by session date ascending.
    async fn list_upcoming_for_user(
        &self,
        user_id: &UserId,
        from: Timestamp,
    ) -> Result<Vec<(SessionAttendance, MentoringSession)>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AttendanceRepository) {}
    }
}
