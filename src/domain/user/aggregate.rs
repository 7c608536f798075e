//! User account as seen by the booking engine.
//!
//! Accounts are provisioned by the identity layer; this crate only reads
//! them, records group membership, and stores the calendar token.

use crate::domain::access::Role;
use crate::domain::calendar::CalendarToken;
use crate::domain::foundation::{GroupId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    role: Role,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    upi: Option<String>,
    mentee_group_id: Option<GroupId>,
    calendar_token: Option<CalendarToken>,
}

impl User {
    /// Creates an account with no names, group, or calendar token.
    pub fn new(id: UserId, role: Role, email: impl Into<String>) -> Self {
        Self {
            id,
            role,
            email: email.into(),
            first_name: None,
            last_name: None,
            upi: None,
            mentee_group_id: None,
            calendar_token: None,
        }
    }

    /// Reconstitute a user from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        role: Role,
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
        upi: Option<String>,
        mentee_group_id: Option<GroupId>,
        calendar_token: Option<CalendarToken>,
    ) -> Self {
        Self {
            id,
            role,
            email,
            first_name,
            last_name,
            upi,
            mentee_group_id,
            calendar_token,
        }
    }

    /// Builder: set first and last name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Builder: set the university person identifier.
    pub fn with_upi(mut self, upi: impl Into<String>) -> Self {
        self.upi = Some(upi.into());
        self
    }

    /// Builder: place the user in a group as mentee.
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.mentee_group_id = Some(group_id);
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn upi(&self) -> Option<&str> {
        self.upi.as_deref()
    }

    pub fn mentee_group_id(&self) -> Option<GroupId> {
        self.mentee_group_id
    }

    pub fn calendar_token(&self) -> Option<&CalendarToken> {
        self.calendar_token.as_ref()
    }

    /// "First Last", falling back to whichever part exists, then the email.
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name(), self.last_name()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }

    pub fn set_mentee_group(&mut self, group_id: Option<GroupId>) {
        self.mentee_group_id = group_id;
    }

    pub fn set_calendar_token(&mut self, token: CalendarToken) {
        self.calendar_token = Some(token);
    }
}
