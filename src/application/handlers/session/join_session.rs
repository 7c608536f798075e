//! JoinSessionHandler - Command handler for self-registration.
//!
//! Eligibility is checked first; the extra-capacity check and the insert
//! then happen as one atomic repository call.

use std::sync::Arc;

use crate::application::access::{check_resource, require_permission};
use crate::application::MembershipResolver;
use crate::domain::access::Permission;
use crate::domain::attendance::SessionAttendance;
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata, SessionId};
use crate::domain::session::{authorize_join, ExtraCapacity, SessionError};
use crate::ports::{AttendanceRepository, SessionRepository};

#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub caller: AuthenticatedUser,
    pub session_id: SessionId,
}

pub struct JoinSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    attendances: Arc<dyn AttendanceRepository>,
    resolver: Arc<MembershipResolver>,
}

impl JoinSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        attendances: Arc<dyn AttendanceRepository>,
        resolver: Arc<MembershipResolver>,
    ) -> Self {
        Self {
            sessions,
            attendances,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        cmd: JoinSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<SessionAttendance, SessionError> {
        // 1. Capability gate
        require_permission(&cmd.caller, Permission::USER_READ, "session:join")?;

        // 2. Load session
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        // 3. Eligibility
        let viewer = self.resolver.viewer(&cmd.caller).await?;
        check_resource(&cmd.caller, "session:join", authorize_join(&session, &viewer))?;

        // 4. Register; group members are never capacity-checked
        let capacity = ExtraCapacity::for_join(&session, &viewer);
        let attendance = SessionAttendance::register(cmd.session_id, cmd.caller.id.clone());
        self.attendances.register(&attendance, capacity).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            user_id = %cmd.caller.id,
            extra = capacity.is_some(),
            correlation_id = %metadata.correlation_id(),
            "Joined session"
        );

        Ok(attendance)
    }
}
