//! Calendar token handlers - get-or-create and rotation.

use std::sync::Arc;

use crate::application::MembershipResolver;
use crate::domain::calendar::{CalendarError, CalendarToken};
use crate::domain::foundation::{AuthenticatedUser, CommandMetadata};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetCalendarTokenQuery {
    pub caller: AuthenticatedUser,
}

/// Returns the caller's token, storing a fresh one on first use.
pub struct GetCalendarTokenHandler {
    users: Arc<dyn UserRepository>,
    resolver: Arc<MembershipResolver>,
}

impl GetCalendarTokenHandler {
    pub fn new(users: Arc<dyn UserRepository>, resolver: Arc<MembershipResolver>) -> Self {
        Self { users, resolver }
    }

    pub async fn handle(
        &self,
        query: GetCalendarTokenQuery,
    ) -> Result<CalendarToken, CalendarError> {
        let account = self.resolver.account(&query.caller).await?;
        if let Some(token) = account.calendar_token() {
            return Ok(token.clone());
        }

        // Compare-and-set: a concurrent first call may win, and we return its token
        let token = self
            .users
            .ensure_calendar_token(account.id(), &CalendarToken::generate())
            .await?;
        Ok(token)
    }
}

#[derive(Debug, Clone)]
pub struct RotateCalendarTokenCommand {
    pub caller: AuthenticatedUser,
}

/// Replaces the caller's token; feed URLs carrying the old one stop working.
pub struct RotateCalendarTokenHandler {
    users: Arc<dyn UserRepository>,
    resolver: Arc<MembershipResolver>,
}

impl RotateCalendarTokenHandler {
    pub fn new(users: Arc<dyn UserRepository>, resolver: Arc<MembershipResolver>) -> Self {
        Self { users, resolver }
    }

    pub async fn handle(
        &self,
        cmd: RotateCalendarTokenCommand,
        metadata: CommandMetadata,
    ) -> Result<CalendarToken, CalendarError> {
        let account = self.resolver.account(&cmd.caller).await?;

        let token = CalendarToken::generate();
        self.users
            .replace_calendar_token(account.id(), &token)
            .await?;

        tracing::info!(
            user_id = %account.id(),
            correlation_id = %metadata.correlation_id(),
            "Calendar token rotated"
        );

        Ok(token)
    }
}
