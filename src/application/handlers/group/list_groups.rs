//! ListGroupsHandler - Query handler for the admin group overview.

use std::sync::Arc;

use crate::application::access::require_group_admin;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::group::{Group, GroupError};
use crate::domain::user::User;
use crate::ports::{GroupRepository, UserRepository};

/// A group with its mentor and mentees resolved.
#[derive(Debug, Clone)]
pub struct GroupOverview {
    pub group: Group,
    pub mentor: Option<User>,
    pub mentees: Vec<User>,
}

#[derive(Debug, Clone)]
pub struct ListGroupsQuery {
    pub caller: AuthenticatedUser,
}

pub struct ListGroupsHandler {
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
}

impl ListGroupsHandler {
    pub fn new(groups: Arc<dyn GroupRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { groups, users }
    }

    pub async fn handle(
        &self,
        query: ListGroupsQuery,
    ) -> Result<Vec<GroupOverview>, GroupError> {
        require_group_admin(&query.caller, "admin:groups:list")?;

        let groups = self.groups.list_all().await?;
        let mut overviews = Vec::with_capacity(groups.len());
        for group in groups {
            let mentor = match group.mentor_id() {
                Some(id) => self.users.find_by_id(id).await?,
                None => None,
            };
            let mentees = self.groups.list_mentees(group.id()).await?;
            overviews.push(GroupOverview {
                group,
                mentor,
                mentees,
            });
        }

        Ok(overviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{caller, World};
    use crate::domain::access::Role;
    use crate::domain::foundation::GroupId;

    #[tokio::test]
    async fn lists_groups_in_number_order_with_members() {
        let world = World::new().await;
        world.store.create_next(GroupId::new()).await.unwrap();
        let handler = ListGroupsHandler::new(world.store.clone(), world.store.clone());

        let overviews = handler
            .handle(
                ListGroupsQuery {
                    caller: caller("admin", Role::Admin),
                },
            )
            .await
            .unwrap();

        assert_eq!(overviews.len(), 2);
        assert_eq!(overviews[0].group.group_number(), 1);
        assert_eq!(overviews[0].mentor.as_ref().map(|m| m.id().as_str()), Some("m"));
        let mut mentees: Vec<&str> = overviews[0].mentees.iter().map(|u| u.id().as_str()).collect();
        mentees.sort();
        assert_eq!(mentees, vec!["a", "b"]);
        assert_eq!(overviews[1].group.group_number(), 2);
        assert!(overviews[1].mentor.is_none());
    }

    #[tokio::test]
    async fn plain_mentor_is_forbidden() {
        let world = World::new().await;
        let handler = ListGroupsHandler::new(world.store.clone(), world.store.clone());

        let result = handler
            .handle(
                ListGroupsQuery {
                    caller: caller("m", Role::Mentor),
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), GroupError::Forbidden);
    }
}
