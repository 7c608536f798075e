//! ListSessionsHandler - Query handler for `GET /sessions`.
//!
//! Two listings share one endpoint:
//!
//! - **mentor**: sessions the caller runs, each with every attendance.
//!   Only honoured for mentor roles; anyone else gets the student listing.
//! - **student**: public sessions, the caller's group's sessions and (for
//!   mentor roles) the caller's own, each annotated with the caller's
//!   attendance and the total attendance count.
//!
//! Both are ordered by session date ascending.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use super::views::{load_attendees, SessionListing, SessionWithAttendees, StudentSessionEntry};
use crate::application::access::require_permission;
use crate::application::MembershipResolver;
use crate::domain::access::Permission;
use crate::domain::foundation::{AuthenticatedUser, GroupId, SessionId, UserId};
use crate::domain::group::Group;
use crate::domain::session::SessionError;
use crate::domain::user::User;
use crate::ports::{
    AttendanceRepository, GroupRepository, SessionRepository, UserRepository, VisibleSessions,
};

/// Requested listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingView {
    #[default]
    Student,
    Mentor,
}

#[derive(Debug, Clone)]
pub struct ListSessionsQuery {
    pub caller: AuthenticatedUser,
    pub view: ListingView,
}

pub struct ListSessionsHandler {
    sessions: Arc<dyn SessionRepository>,
    attendances: Arc<dyn AttendanceRepository>,
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
    resolver: Arc<MembershipResolver>,
}

impl ListSessionsHandler {
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

    pub async fn handle(&self, query: ListSessionsQuery) -> Result<SessionListing, SessionError> {
        require_permission(&query.caller, Permission::USER_READ, "session:list")?;

        if query.view == ListingView::Mentor && query.caller.role.is_mentor_role() {
            self.mentor_listing(&query.caller).await
        } else {
            self.student_listing(&query.caller).await
        }
    }

    async fn mentor_listing(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<SessionListing, SessionError> {
        let sessions = self.sessions.list_by_mentor(&caller.id).await?;
        let mut groups = GroupCache::default();

        let mut listing = Vec::with_capacity(sessions.len());
        for session in sessions {
            let attendees =
                load_attendees(self.attendances.as_ref(), self.users.as_ref(), session.id())
                    .await?;
            let group = groups.get(self.groups.as_ref(), session.group_id()).await?;
            listing.push(SessionWithAttendees {
                session,
                group,
                attendees,
            });
        }
        Ok(SessionListing::Mentor(listing))
    }

    async fn student_listing(
        &self,
        caller: &AuthenticatedUser,
    ) -> Result<SessionListing, SessionError> {
        let viewer = self.resolver.viewer(caller).await?;
        let filter = VisibleSessions {
            group_id: viewer.mentee_group,
            mentor_id: caller.role.is_mentor_role().then(|| caller.id.clone()),
        };
        let sessions = self.sessions.list_visible(&filter).await?;

        let mentor_ids: Vec<UserId> = sessions.iter().map(|s| s.mentor_id().clone()).collect();
        let mentors: HashMap<UserId, User> = self
            .users
            .find_by_ids(&mentor_ids)
            .await?
            .into_iter()
            .map(|u| (u.id().clone(), u))
            .collect();
        let session_ids: Vec<SessionId> = sessions.iter().map(|s| *s.id()).collect();
        let mut summaries = self
            .attendances
            .summarize_for_user(&session_ids, &caller.id)
            .await?;
        let mut groups = GroupCache::default();

        let mut listing = Vec::with_capacity(sessions.len());
        for session in sessions {
            let summary = summaries.remove(session.id()).unwrap_or_default();
            let group = groups.get(self.groups.as_ref(), session.group_id()).await?;
            listing.push(StudentSessionEntry {
                mentor: mentors.get(session.mentor_id()).cloned(),
                group,
                my_attendance: summary.mine,
                attendance_count: summary.count,
                session,
            });
        }
        Ok(SessionListing::Student(listing))
    }
}

/// Per-request memo so each group is fetched once.
#[derive(Default)]
struct GroupCache {
    seen: HashMap<GroupId, Option<Group>>,
}

impl GroupCache {
    async fn get(
        &mut self,
        groups: &dyn GroupRepository,
        id: &GroupId,
    ) -> Result<Option<Group>, SessionError> {
        if let Some(cached) = self.seen.get(id) {
            return Ok(cached.clone());
        }
        let group = groups.find_by_id(id).await?;
        self.seen.insert(*id, group.clone());
        Ok(group)
    }
}
