//! GetSessionHandler - Query handler for one session with its attendees.

use std::sync::Arc;

use super::views::{load_attendees, SessionWithAttendees};
use crate::application::access::{check_resource, require_permission};
use crate::application::MembershipResolver;
use crate::domain::access::Permission;
use crate::domain::foundation::{AuthenticatedUser, SessionId};
use crate::domain::session::{authorize_view, SessionError};
use crate::ports::{AttendanceRepository, GroupRepository, SessionRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub caller: AuthenticatedUser,
    pub session_id: SessionId,
}

pub struct GetSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    attendances: Arc<dyn AttendanceRepository>,
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
    resolver: Arc<MembershipResolver>,
}

impl GetSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        attendances: Arc<dyn AttendanceRepository>,
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        resolver: Arc<MembershipResolver>,
    ) -> Self {
        Self {
            sessions,
            attendances,
            users,
            groups,
            resolver,
        }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionWithAttendees, SessionError> {
        require_permission(&query.caller, Permission::USER_READ, "session:read")?;

        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or(SessionError::NotFound(query.session_id))?;

        let viewer = self.resolver.viewer(&query.caller).await?;
        check_resource(&query.caller, "session:read", authorize_view(&session, &viewer))?;

        let attendees =
            load_attendees(self.attendances.as_ref(), self.users.as_ref(), session.id()).await?;
        let group = self.groups.find_by_id(session.group_id()).await?;

        Ok(SessionWithAttendees {
            session,
            group,
            attendees,
        })
    }
}
