//! HTTP DTOs for user endpoints.

use serde::Serialize;

use crate::application::handlers::CurrentUser;
use crate::domain::access::Role;
use crate::domain::calendar::CalendarToken;
use crate::domain::group::{Category, Group};
use crate::domain::user::User;

/// Public fields of an account, as shown next to sessions and groups.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi: Option<String>,
}

impl From<&User> for UserSummaryResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            first_name: user.first_name().map(str::to_string),
            last_name: user.last_name().map(str::to_string),
            upi: user.upi().map(str::to_string),
        }
    }
}

/// A group reference inside a profile.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRefResponse {
    pub id: String,
    pub group_number: u32,
    pub category: Category,
}

impl From<&Group> for GroupRefResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id().to_string(),
            group_number: group.group_number(),
            category: group.category(),
        }
    }
}

/// Response for `GET /user`.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub user: UserSummaryResponse,
    pub role: Role,
    pub mentee_group: Option<GroupRefResponse>,
    pub mentored_group: Option<GroupRefResponse>,
    /// `resource:action` strings
    pub permissions: Vec<String>,
}

impl From<CurrentUser> for CurrentUserResponse {
    fn from(current: CurrentUser) -> Self {
        Self {
            user: UserSummaryResponse::from(&current.user),
            role: current.user.role(),
            mentee_group: current.membership.mentee_group.as_ref().map(Into::into),
            mentored_group: current.membership.mentored_group.as_ref().map(Into::into),
            permissions: current.permissions.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Response for the calendar token endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarTokenResponse {
    pub token: String,
}

impl From<CalendarToken> for CalendarTokenResponse {
    fn from(token: CalendarToken) -> Self {
        Self {
            token: token.as_str().to_string(),
        }
    }
}
