//! DeleteGroupHandler - Command handler for removing a group.
//!
//! Mentees become group-less; the group's sessions and their attendances
//! are deleted with it.

use std::sync::Arc;

use crate::application::access::require_group_admin;
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, GroupId};
use crate::domain::group::GroupError;
use crate::ports::GroupRepository;

#[derive(Debug, Clone)]
pub struct DeleteGroupCommand {
    pub caller: AuthenticatedUser,
    pub group_id: GroupId,
}

pub struct DeleteGroupHandler {
    groups: Arc<dyn GroupRepository>,
}

impl DeleteGroupHandler {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn handle(
        &self,
        cmd: DeleteGroupCommand,
        metadata: CommandMetadata,
    ) -> Result<(), GroupError> {
        require_group_admin(&cmd.caller, "admin:groups:delete")?;

        self.groups.delete(&cmd.group_id).await?;

        tracing::info!(
            group_id = %cmd.group_id,
            deleted_by = %cmd.caller.id,
            correlation_id = %metadata.correlation_id(),
            "Group deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{caller, uid, World};
    use crate::domain::access::Role;
    use crate::ports::{SessionRepository, UserRepository};

    #[tokio::test]
    async fn deletes_group_and_its_sessions() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = DeleteGroupHandler::new(world.store.clone());

        handler
            .handle(
                DeleteGroupCommand {
                    caller: caller("admin", Role::Superadmin),
                    group_id: *world.group.id(),
                },
                CommandMetadata::test_fixture("admin"),
            )
            .await
            .unwrap();

        assert!(SessionRepository::find_by_id(&*world.store, session.id())
            .await
            .unwrap()
            .is_none());
        let a = UserRepository::find_by_id(&*world.store, &uid("a")).await.unwrap().unwrap();
        assert_eq!(a.mentee_group_id(), None);
    }

    #[tokio::test]
    async fn missing_group_is_not_found() {
        let world = World::new().await;
        let handler = DeleteGroupHandler::new(world.store.clone());
        let id = GroupId::new();

        let result = handler
            .handle(
                DeleteGroupCommand {
                    caller: caller("admin", Role::Admin),
                    group_id: id,
                },
                CommandMetadata::test_fixture("admin"),
            )
            .await;
        assert_eq!(result.unwrap_err(), GroupError::NotFound(id));
    }
}
