//! CreateSessionHandler - Command handler for scheduling a session.

use std::sync::Arc;

use crate::application::access::require_mentor_role;
use crate::domain::attendance::SessionAttendance;
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, SessionId};
use crate::domain::session::{MentoringSession, SessionDetails, SessionError};
use crate::ports::{GroupRepository, SessionRepository};

/// Command to create a session in the caller's group.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub caller: AuthenticatedUser,
    pub details: SessionDetails,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: MentoringSession,
    /// Attendances created for the group's mentees.
    pub enrolled: Vec<SessionAttendance>,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl CreateSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { sessions, groups }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, SessionError> {
        // 1. Mentor gate
        require_mentor_role(&cmd.caller, "session:create")?;

        // 2. The caller's group owns the session
        let group = self
            .groups
            .find_by_mentor(&cmd.caller.id)
            .await?
            .ok_or(SessionError::NoGroupAssigned)?;

        // 3. Build aggregate; category comes from the group
        let session = MentoringSession::new(
            SessionId::new(),
            cmd.caller.id.clone(),
            &group,
            cmd.details,
        )?;

        // 4. Insert and auto-enroll atomically
        let enrolled = self.sessions.create_with_enrollment(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            group_id = %group.id(),
            enrolled = enrolled.len(),
            correlation_id = %metadata.correlation_id(),
            "Session created"
        );

        Ok(CreateSessionResult { session, enrolled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{caller, details, World};
    use crate::domain::access::Role;
    use crate::domain::attendance::AttendanceStatus;
    use crate::domain::group::Category;

    fn handler(world: &World) -> CreateSessionHandler {
        CreateSessionHandler::new(world.store.clone(), world.store.clone())
    }

    #[tokio::test]
    async fn auto_enrolls_every_mentee() {
        let world = World::new().await;
        let cmd = CreateSessionCommand {
            caller: caller("m", Role::Mentor),
            details: details("Intro", false, None),
        };

        let result = handler(&world)
            .handle(cmd, CommandMetadata::test_fixture("m"))
            .await
            .unwrap();

        assert_eq!(result.enrolled.len(), 2);
        assert!(result
            .enrolled
            .iter()
            .all(|a| a.status() == AttendanceStatus::Registered));
        assert_eq!(result.session.group_id(), world.group.id());
        assert_eq!(result.session.category(), Category::CsBscMeng);
    }

    #[tokio::test]
    async fn students_are_forbidden() {
        let world = World::new().await;
        let cmd = CreateSessionCommand {
            caller: caller("a", Role::Student),
            details: details("Nope", true, None),
        };

        let result = handler(&world)
            .handle(cmd, CommandMetadata::test_fixture("a"))
            .await;
        assert!(matches!(result, Err(SessionError::Forbidden(_))));
    }

    #[tokio::test]
    async fn mentor_without_group_is_rejected() {
        let world = World::new().await;
        let cmd = CreateSessionCommand {
            caller: caller("admin", Role::Admin),
            details: details("Orphan", true, None),
        };

        let result = handler(&world)
            .handle(cmd, CommandMetadata::test_fixture("admin"))
            .await;
        assert_eq!(result.unwrap_err(), SessionError::NoGroupAssigned);
    }

    #[tokio::test]
    async fn blank_title_fails_validation() {
        let world = World::new().await;
        let cmd = CreateSessionCommand {
            caller: caller("m", Role::Mentor),
            details: details("   ", false, None),
        };

        let result = handler(&world)
            .handle(cmd, CommandMetadata::test_fixture("m"))
            .await;
        assert!(matches!(result, Err(SessionError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn zero_capacity_means_unlimited() {
        let world = World::new().await;
        let cmd = CreateSessionCommand {
            caller: caller("m", Role::Mentor),
            details: details("Open", true, Some(0)),
        };

        let result = handler(&world)
            .handle(cmd, CommandMetadata::test_fixture("m"))
            .await
            .unwrap();
        assert_eq!(result.session.max_capacity(), None);
    }
}
