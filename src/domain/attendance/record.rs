//! Session attendance record.

use serde::{Deserialize, Serialize};

use super::AttendanceStatus;
use crate::domain::foundation::{AttendanceId, SessionId, Timestamp, UserId};

/// One user's attendance at one session. Unique per `(session_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAttendance {
    id: AttendanceId,
    session_id: SessionId,
    user_id: UserId,
    status: AttendanceStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl SessionAttendance {
    /// New attendance in the given status.
    pub fn new(session_id: SessionId, user_id: UserId, status: AttendanceStatus) -> Self {
        let now = Timestamp::now();
        Self {
            id: AttendanceId::new(),
            session_id,
            user_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// New `REGISTERED` attendance, as created by auto-enrollment and self-join.
    pub fn register(session_id: SessionId, user_id: UserId) -> Self {
        Self::new(session_id, user_id, AttendanceStatus::Registered)
    }

    pub fn reconstitute(
        id: AttendanceId,
        session_id: SessionId,
        user_id: UserId,
        status: AttendanceStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            user_id,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &AttendanceId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Overwrites the status. Every transition is allowed.
    pub fn set_status(&mut self, status: AttendanceStatus) {
        self.status = status;
        self.updated_at = Timestamp::now();
    }
}

/// One entry of a mentor's bulk attendance update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    pub user_id: UserId,
    pub status: AttendanceStatus,
}
