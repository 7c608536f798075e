//! View and join eligibility for sessions.
//!
//! ```text
//! view: public | owner | member of session's group | any mentor role
//! join: public | member of session's group
//! ```
//!
//! A mentor role lets a user look at any session but never join one that
//! is private to another group.

use super::MentoringSession;
use crate::domain::access::Role;
use crate::domain::foundation::{AuthorizationResult, Authorizable, GroupId, UserId};

/// The caller, resolved with their mentee group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: UserId,
    pub role: Role,
    pub mentee_group: Option<GroupId>,
}

impl Viewer {
    pub fn new(user_id: UserId, role: Role, mentee_group: Option<GroupId>) -> Self {
        Self {
            user_id,
            role,
            mentee_group,
        }
    }

    /// True when the viewer is a mentee of the session's owning group.
    pub fn is_member_of(&self, session: &MentoringSession) -> bool {
        self.mentee_group.as_ref() == Some(session.group_id())
    }
}

pub fn can_view(session: &MentoringSession, viewer: &Viewer) -> bool {
    session.is_public()
        || session.mentor_id() == &viewer.user_id
        || viewer.is_member_of(session)
        || viewer.role.is_mentor_role()
}

pub fn can_join(session: &MentoringSession, viewer: &Viewer) -> bool {
    session.is_public() || viewer.is_member_of(session)
}

/// [`can_view`] with a denial reason for audit logs.
pub fn authorize_view(session: &MentoringSession, viewer: &Viewer) -> AuthorizationResult {
    if can_view(session, viewer) {
        AuthorizationResult::granted(
            MentoringSession::RESOURCE_TYPE,
            session.resource_id(),
            &viewer.user_id,
        )
    } else {
        AuthorizationResult::denied(
            MentoringSession::RESOURCE_TYPE,
            session.resource_id(),
            &viewer.user_id,
            "You do not have access to this session",
        )
    }
}

/// [`can_join`] with a denial reason for audit logs.
pub fn authorize_join(session: &MentoringSession, viewer: &Viewer) -> AuthorizationResult {
    if can_join(session, viewer) {
        AuthorizationResult::granted(
            MentoringSession::RESOURCE_TYPE,
            session.resource_id(),
            &viewer.user_id,
        )
    } else {
        AuthorizationResult::denied(
            MentoringSession::RESOURCE_TYPE,
            session.resource_id(),
            &viewer.user_id,
            "You cannot join this session",
        )
    }
}
