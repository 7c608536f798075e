//! CreateGroupHandler - Command handler for adding the next numbered group.

use std::sync::Arc;

use crate::application::access::require_group_admin;
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, GroupId};
use crate::domain::group::{Group, GroupError};
use crate::ports::GroupRepository;

#[derive(Debug, Clone)]
pub struct CreateGroupCommand {
    pub caller: AuthenticatedUser,
}

pub struct CreateGroupHandler {
    groups: Arc<dyn GroupRepository>,
}

impl CreateGroupHandler {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn handle(
        &self,
        cmd: CreateGroupCommand,
        metadata: CommandMetadata,
    ) -> Result<Group, GroupError> {
        require_group_admin(&cmd.caller, "admin:groups:create")?;

        let group = self.groups.create_next(GroupId::new()).await?;

        tracing::info!(
            group_id = %group.id(),
            group_number = group.group_number(),
            created_by = %cmd.caller.id,
            correlation_id = %metadata.correlation_id(),
            "Group created"
        );

        Ok(group)
    }
}
