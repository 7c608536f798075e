//! UpdateSessionHandler - Command handler for editing a session.

use std::sync::Arc;

use crate::application::access::require_mentor_role;
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, OwnedByUser, SessionId};
use crate::domain::session::{MentoringSession, SessionDetails, SessionError};
use crate::ports::{GroupRepository, SessionRepository};

/// Command to replace a session's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateSessionCommand {
    pub caller: AuthenticatedUser,
    pub session_id: SessionId,
    pub details: SessionDetails,
}

pub struct UpdateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl UpdateSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { sessions, groups }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<MentoringSession, SessionError> {
        // 1. Mentor gate
        require_mentor_role(&cmd.caller, "session:update")?;

        // 2. Missing and not-owned look the same
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .filter(|s| s.is_owner(&cmd.caller.id))
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        // 3. Re-inherit category from the owning group
        let group = self
            .groups
            .find_by_id(session.group_id())
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;
        session.update(cmd.details, &group)?;

        // 4. Persist
        self.sessions.update(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            correlation_id = %metadata.correlation_id(),
            "Session updated"
        );

        Ok(session)
    }
}
