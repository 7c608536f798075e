//! Group membership resolution and assignment rules.

use serde::Serialize;

use super::Group;
use crate::domain::foundation::{DomainError, ErrorCode, GroupId, UserId};

/// The groups a single user belongs to, in each capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupMembership {
    /// Group listing the user as a mentee.
    pub mentee_group: Option<Group>,
    /// Group listing the user as its mentor.
    pub mentored_group: Option<Group>,
}

impl GroupMembership {
    pub fn new(mentee_group: Option<Group>, mentored_group: Option<Group>) -> Self {
        Self {
            mentee_group,
            mentored_group,
        }
    }

    pub fn mentee_group_id(&self) -> Option<GroupId> {
        self.mentee_group.as_ref().map(|g| *g.id())
    }

    pub fn mentored_group_id(&self) -> Option<GroupId> {
        self.mentored_group.as_ref().map(|g| *g.id())
    }
}

/// Rejects a mentee list that would pull a user out of a different group.
///
/// `candidates` pairs each requested mentee with the group they currently
/// belong to. Users already in `target`, or in no group, are accepted.
pub fn check_mentee_assignment<'a>(
    target: &GroupId,
    candidates: impl IntoIterator<Item = (&'a UserId, Option<GroupId>)>,
) -> Result<(), DomainError> {
    for (user_id, current) in candidates {
        if let Some(current) = current {
            if current != *target {
                return Err(DomainError::new(
                    ErrorCode::MenteeAlreadyAssigned,
                    format!("User {} is already a mentee of another group", user_id),
                )
                .with_detail("user_id", user_id.as_str())
                .with_detail("group_id", current.to_string()));
            }
        }
    }
    Ok(())
}

/// Rejects assigning a mentor who already mentors a different group.
pub fn check_mentor_assignment(
    target: &GroupId,
    mentor_id: &UserId,
    currently_mentoring: Option<GroupId>,
) -> Result<(), DomainError> {
    match currently_mentoring {
        Some(other) if other != *target => Err(DomainError::new(
            ErrorCode::MentorAlreadyAssigned,
            format!("User {} already mentors another group", mentor_id),
        )
        .with_detail("user_id", mentor_id.as_str())
        .with_detail("group_id", other.to_string())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[test]
    fn membership_exposes_group_ids() {
        let group = Group::new(GroupId::new(), 1);
        let id = *group.id();
        let membership = GroupMembership::new(Some(group), None);

        assert_eq!(membership.mentee_group_id(), Some(id));
        assert_eq!(membership.mentored_group_id(), None);
    }

    #[test]
    fn mentee_check_accepts_unassigned_and_same_group() {
        let target = GroupId::new();
        let a = uid("a");
        let b = uid("b");

        let result = check_mentee_assignment(&target, [(&a, None), (&b, Some(target))]);
        assert!(result.is_ok());
    }

    #[test]
    fn mentee_check_rejects_member_of_other_group() {
        let target = GroupId::new();
        let other = GroupId::new();
        let a = uid("a");

        let err = check_mentee_assignment(&target, [(&a, Some(other))]).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenteeAlreadyAssigned);
        assert_eq!(err.detail("user_id"), Some("a"));
    }

    #[test]
    fn mentor_check_rejects_mentor_of_other_group() {
        let target = GroupId::new();
        let m = uid("m");

        assert!(check_mentor_assignment(&target, &m, None).is_ok());
        assert!(check_mentor_assignment(&target, &m, Some(target)).is_ok());
        let err = check_mentor_assignment(&target, &m, Some(GroupId::new())).unwrap_err();
        assert_eq!(err.code, ErrorCode::MentorAlreadyAssigned);
    }
}
