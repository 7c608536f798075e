//! UpdateGroupHandler - Command handler for reassigning a group.
//!
//! Sets mentor, category and info, and replaces the mentee set wholesale.
//! Users dropped from the list become group-less.

use std::sync::Arc;

use crate::application::access::require_group_admin;
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, GroupId, UserId};
use crate::domain::group::{Category, Group, GroupError};
use crate::ports::GroupRepository;

#[derive(Debug, Clone)]
pub struct UpdateGroupCommand {
    pub caller: AuthenticatedUser,
    pub group_id: GroupId,
    pub mentor_id: Option<UserId>,
    pub mentee_ids: Vec<UserId>,
    pub category: Category,
    pub info: Option<String>,
}

pub struct UpdateGroupHandler {
    groups: Arc<dyn GroupRepository>,
}

impl UpdateGroupHandler {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn handle(
        &self,
        cmd: UpdateGroupCommand,
        metadata: CommandMetadata,
    ) -> Result<Group, GroupError> {
        // 1. Admin gate
        require_group_admin(&cmd.caller, "admin:groups:update")?;

        // 2. Load group
        let mut group = self
            .groups
            .find_by_id(&cmd.group_id)
            .await?
            .ok_or(GroupError::NotFound(cmd.group_id))?;

        // 3. Apply changes
        group.reassign(cmd.mentor_id, cmd.category, cmd.info)?;

        // 4. Persist atomically; membership conflicts surface here
        self.groups
            .update_with_mentees(&group, &cmd.mentee_ids)
            .await?;

        tracing::info!(
            group_id = %group.id(),
            mentor_id = ?group.mentor_id().map(UserId::as_str),
            mentees = cmd.mentee_ids.len(),
            updated_by = %cmd.caller.id,
            correlation_id = %metadata.correlation_id(),
            "Group updated"
        );

        Ok(group)
    }
}
