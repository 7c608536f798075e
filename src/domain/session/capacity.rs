//! Extra-capacity accounting.
//!
//! `max_capacity` limits only attendees from outside the owning group.
//! Group members are auto-enrolled and never counted or checked. An attendee
//! with no group at all counts as extra.

use super::{MentoringSession, Viewer};
use crate::domain::foundation::{DomainError, ErrorCode, GroupId};

/// The limit applied to a single join attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraCapacity {
    group_id: GroupId,
    max: u32,
}

impl ExtraCapacity {
    pub fn new(group_id: GroupId, max: u32) -> Self {
        Self { group_id, max }
    }

    /// The limit a joiner is subject to, if any.
    ///
    /// `None` when the session has no limit or the joiner belongs to the
    /// session's group.
    pub fn for_join(session: &MentoringSession, joiner: &Viewer) -> Option<Self> {
        if joiner.is_member_of(session) {
            return None;
        }
        session
            .max_capacity()
            .map(|max| Self::new(*session.group_id(), max))
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether an attendee in `attendee_group` consumes an extra slot.
    pub fn counts_as_extra(&self, attendee_group: Option<GroupId>) -> bool {
        attendee_group != Some(self.group_id)
    }

    /// Admits one more extra attendee if `current_extra` is below the limit.
    pub fn admit(&self, current_extra: u32) -> Result<(), DomainError> {
        if current_extra >= self.max {
            return Err(DomainError::new(
                ErrorCode::CapacityExceeded,
                "Session is full (extra capacity limit reached)",
            )
            .with_detail("current", current_extra.to_string())
            .with_detail("max_capacity", self.max.to_string()));
        }
        Ok(())
    }
}
