//! UpdateAttendanceHandler - Command handler for a mentor's roll call.
//!
//! Each `{user_id, status}` pair is an independent upsert. Transitions are
//! unrestricted.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::application::access::require_mentor_role;
use crate::domain::attendance::{AttendanceUpdate, SessionAttendance};
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, OwnedByUser, SessionId};
use crate::domain::session::SessionError;
use crate::ports::{AttendanceRepository, SessionRepository};

#[derive(Debug, Clone)]
pub struct UpdateAttendanceCommand {
    pub caller: AuthenticatedUser,
    pub session_id: SessionId,
    pub updates: Vec<AttendanceUpdate>,
}

pub struct UpdateAttendanceHandler {
    sessions: Arc<dyn SessionRepository>,
    attendances: Arc<dyn AttendanceRepository>,
}

impl UpdateAttendanceHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        attendances: Arc<dyn AttendanceRepository>,
    ) -> Self {
        Self {
            sessions,
            attendances,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAttendanceCommand,
        metadata: CommandMetadata,
    ) -> Result<Vec<SessionAttendance>, SessionError> {
        // 1. Mentor gate
        require_mentor_role(&cmd.caller, "session:manage_attendance")?;

        // 2. Owner only; others see not found
        self.sessions
            .find_by_id(&cmd.session_id)
            .await?
            .filter(|s| s.is_owner(&cmd.caller.id))
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        // 3. Upsert every pair
        let session_id = cmd.session_id;
        let updated = try_join_all(cmd.updates.iter().map(|u| {
            self.attendances
                .upsert_status(&session_id, &u.user_id, u.status)
        }))
        .await?;

        tracing::info!(
            session_id = %session_id,
            updated = updated.len(),
            correlation_id = %metadata.correlation_id(),
            "Attendance updated"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{caller, uid, World};
    use crate::domain::access::Role;
    use crate::domain::attendance::AttendanceStatus;

    fn update(user: &str, status: AttendanceStatus) -> AttendanceUpdate {
        AttendanceUpdate {
            user_id: uid(user),
            status,
        }
    }

    #[tokio::test]
    async fn owner_marks_existing_and_new_attendees() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = UpdateAttendanceHandler::new(world.store.clone(), world.store.clone());

        let updated = handler
            .handle(
                UpdateAttendanceCommand {
                    caller: caller("m", Role::Mentor),
                    session_id: *session.id(),
                    updates: vec![
                        update("a", AttendanceStatus::Present),
                        update("c", AttendanceStatus::Absent),
                    ],
                },
                CommandMetadata::test_fixture("m"),
            )
            .await
            .unwrap();

        assert_eq!(updated.len(), 2);
        let a = world.store.find(session.id(), &uid("a")).await.unwrap().unwrap();
        assert_eq!(a.status(), AttendanceStatus::Present);
        let c = world.store.find(session.id(), &uid("c")).await.unwrap().unwrap();
        assert_eq!(c.status(), AttendanceStatus::Absent);
        assert_eq!(world.store.count_for_session(session.id()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn cancelled_can_return_to_registered() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = UpdateAttendanceHandler::new(world.store.clone(), world.store.clone());

        for status in [AttendanceStatus::Cancelled, AttendanceStatus::Registered] {
            handler
                .handle(
                    UpdateAttendanceCommand {
                        caller: caller("m", Role::Mentor),
                        session_id: *session.id(),
                        updates: vec![update("b", status)],
                    },
                    CommandMetadata::test_fixture("m"),
                )
                .await
                .unwrap();
        }

        let b = world.store.find(session.id(), &uid("b")).await.unwrap().unwrap();
        assert_eq!(b.status(), AttendanceStatus::Registered);
    }

    #[tokio::test]
    async fn non_owner_gets_not_found() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = UpdateAttendanceHandler::new(world.store.clone(), world.store.clone());

        let result = handler
            .handle(
                UpdateAttendanceCommand {
                    caller: caller("admin", Role::Admin),
                    session_id: *session.id(),
                    updates: vec![update("a", AttendanceStatus::Absent)],
                },
                CommandMetadata::test_fixture("admin"),
            )
            .await;
        assert_eq!(result.unwrap_err(), SessionError::NotFound(*session.id()));
    }

    #[tokio::test]
    async fn unknown_user_fails_validation() {
        let world = World::new().await;
        let session = world.session(false, None).await;
        let handler = UpdateAttendanceHandler::new(world.store.clone(), world.store.clone());

        let result = handler
            .handle(
                UpdateAttendanceCommand {
                    caller: caller("m", Role::Mentor),
                    session_id: *session.id(),
                    updates: vec![update("nobody", AttendanceStatus::Present)],
                },
                CommandMetadata::test_fixture("m"),
            )
            .await;
        assert!(matches!(
            result,
            Err(SessionError::ValidationFailed { ref field, .. }) if field == "user_id"
        ));
    }
}
