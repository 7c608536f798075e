//! Read models returned by the session handlers.

use std::collections::HashMap;

use crate::domain::attendance::SessionAttendance;
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::group::Group;
use crate::domain::session::MentoringSession;
use crate::domain::user::User;
use crate::ports::{AttendanceRepository, UserRepository};

/// An attendance with the attendee's account, when it still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeEntry {
    pub attendance: SessionAttendance,
    pub user: Option<User>,
}

/// A session with every attendance, as its mentor sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionWithAttendees {
    pub session: MentoringSession,
    pub group: Option<Group>,
    pub attendees: Vec<AttendeeEntry>,
}

/// A session as a prospective attendee sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSessionEntry {
    pub session: MentoringSession,
    pub group: Option<Group>,
    pub mentor: Option<User>,
    /// The caller's own attendance, if any.
    pub my_attendance: Option<SessionAttendance>,
    /// Attendances of all statuses.
    pub attendance_count: u32,
}

/// Which listing `GET /sessions` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionListing {
    Mentor(Vec<SessionWithAttendees>),
    Student(Vec<StudentSessionEntry>),
}

/// Loads a session's attendances joined with their accounts.
pub(super) async fn load_attendees(
    attendances: &dyn AttendanceRepository,
    users: &dyn UserRepository,
    session_id: &SessionId,
) -> Result<Vec<AttendeeEntry>, DomainError> {
    let list = attendances.list_for_session(session_id).await?;
    let ids: Vec<UserId> = list.iter().map(|a| a.user_id().clone()).collect();
    let mut accounts: HashMap<UserId, User> = users
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|u| (u.id().clone(), u))
        .collect();

    Ok(list
        .into_iter()
        .map(|attendance| {
            let user = accounts.remove(attendance.user_id());
            AttendeeEntry { attendance, user }
        })
        .collect())
}
