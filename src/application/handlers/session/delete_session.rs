//! DeleteSessionHandler - Command handler for cancelling a session outright.

use std::sync::Arc;

use crate::application::access::require_mentor_role;
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, OwnedByUser, SessionId};
use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub caller: AuthenticatedUser,
    pub session_id: SessionId,
}

pub struct DeleteSessionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl DeleteSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: DeleteSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<(), SessionError> {
        require_mentor_role(&cmd.caller, "session:delete")?;

        self.sessions
            .find_by_id(&cmd.session_id)
            .await?
            .filter(|s| s.is_owner(&cmd.caller.id))
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        // Attendances go with it
        self.sessions.delete(&cmd.session_id).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            correlation_id = %metadata.correlation_id(),
            "Session deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{caller, World};
    use crate::domain::access::Role;
    use crate::ports::AttendanceRepository;

    #[tokio::test]
    async fn owner_delete_cascades_attendances() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = DeleteSessionHandler::new(world.store.clone());

        handler
            .handle(
                DeleteSessionCommand {
                    caller: caller("m", Role::Mentor),
                    session_id: *session.id(),
                },
                CommandMetadata::test_fixture("m"),
            )
            .await
            .unwrap();

        assert!(SessionRepository::find_by_id(&*world.store, session.id())
            .await
            .unwrap()
            .is_none());
        assert_eq!(world.store.count_for_session(session.id()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn non_owner_gets_not_found_and_session_survives() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = DeleteSessionHandler::new(world.store.clone());

        let result = handler
            .handle(
                DeleteSessionCommand {
                    caller: caller("admin", Role::Superadmin),
                    session_id: *session.id(),
                },
                CommandMetadata::test_fixture("admin"),
            )
            .await;

        assert_eq!(result.unwrap_err(), SessionError::NotFound(*session.id()));
        assert!(SessionRepository::find_by_id(&*world.store, session.id())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn students_are_forbidden() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = DeleteSessionHandler::new(world.store.clone());

        let result = handler
            .handle(
                DeleteSessionCommand {
                    caller: caller("a", Role::Student),
                    session_id: *session.id(),
                },
                CommandMetadata::test_fixture("a"),
            )
            .await;
        assert!(matches!(result, Err(SessionError::Forbidden(_))));
    }
}
