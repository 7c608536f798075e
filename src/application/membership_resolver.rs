//! MembershipResolver - Resolves a caller's account and group memberships.
//!
//! Accounts are created on first sight from the credential's claims, so an
//! authenticated caller always has a user row to hang attendances and a
//! calendar token on. The credential's role is authoritative.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, UserId};
use crate::domain::group::GroupMembership;
use crate::domain::session::Viewer;
use crate::domain::user::User;
use crate::ports::{GroupRepository, UserRepository};

pub struct MembershipResolver {
    users: Arc<dyn UserRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl MembershipResolver {
    pub fn new(users: Arc<dyn UserRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { users, groups }
    }

    /// Loads the caller's account, creating it from the credential if absent.
    pub async fn account(&self, caller: &AuthenticatedUser) -> Result<User, DomainError> {
        if let Some(user) = self.users.find_by_id(&caller.id).await? {
            return Ok(user);
        }

        let mut user = User::new(caller.id.clone(), caller.role, caller.email.clone());
        if let Some(name) = &caller.display_name {
            let (first, last) = name.split_once(' ').unwrap_or((name.as_str(), ""));
            user = user.with_name(first, last);
        }
        let stored = self.users.insert_if_absent(&user).await?;

        tracing::info!(user_id = %stored.id(), role = %caller.role, "Provisioned user account");
        Ok(stored)
    }

    /// The caller as seen by session eligibility rules.
    pub async fn viewer(&self, caller: &AuthenticatedUser) -> Result<Viewer, DomainError> {
        let account = self.account(caller).await?;
        Ok(Viewer::new(
            caller.id.clone(),
            caller.role,
            account.mentee_group_id(),
        ))
    }

    /// The group a user is mentee of and the group they mentor, if any.
    pub async fn membership(&self, user_id: &UserId) -> Result<GroupMembership, DomainError> {
        let mentee_group = match self.users.find_by_id(user_id).await? {
            Some(user) => match user.mentee_group_id() {
                Some(group_id) => self.groups.find_by_id(&group_id).await?,
                None => None,
            },
            None => None,
        };
        let mentored_group = self.groups.find_by_mentor(user_id).await?;

        Ok(GroupMembership::new(mentee_group, mentored_group))
    }
}
