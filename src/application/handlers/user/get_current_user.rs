//! GetCurrentUserHandler - Query handler for the caller's own profile.

use std::sync::Arc;

use crate::application::access::require_permission;
use crate::application::MembershipResolver;
use crate::domain::access::{permissions_for, Permission};
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::domain::group::GroupMembership;
use crate::domain::user::User;

/// Profile, group membership and effective permissions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub membership: GroupMembership,
    pub permissions: &'static [Permission],
}

#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub caller: AuthenticatedUser,
}

pub struct GetCurrentUserHandler {
    resolver: Arc<MembershipResolver>,
}

impl GetCurrentUserHandler {
    pub fn new(resolver: Arc<MembershipResolver>) -> Self {
        Self { resolver }
    }

    pub async fn handle(
        &self,
        query: GetCurrentUserQuery,
    ) -> Result<CurrentUser, DomainError> {
        require_permission(&query.caller, Permission::USER_READ, "user:read")
            .map_err(|denied| DomainError::new(ErrorCode::Forbidden, denied.reason))?;

        let user = self.resolver.account(&query.caller).await?;
        let membership = self.resolver.membership(user.id()).await?;

        Ok(CurrentUser {
            permissions: permissions_for(query.caller.role),
            user,
            membership,
        })
    }
}
