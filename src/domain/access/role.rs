//! Platform roles and the role allow-lists used by route gates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The closed set of platform roles. Assigned at account creation, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Mentor,
    SeniorMentor,
    Admin,
    Superadmin,
}

/// Roles allowed to create and manage sessions.
pub const MENTOR_ROLES: [Role; 4] = [Role::Mentor, Role::SeniorMentor, Role::Admin, Role::Superadmin];

/// Roles allowed to administer mentor groups.
pub const ADMIN_ROLES: [Role; 3] = [Role::SeniorMentor, Role::Admin, Role::Superadmin];

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Student,
        Role::Mentor,
        Role::SeniorMentor,
        Role::Admin,
        Role::Superadmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Mentor => "MENTOR",
            Role::SeniorMentor => "SENIOR_MENTOR",
            Role::Admin => "ADMIN",
            Role::Superadmin => "SUPERADMIN",
        }
    }

    /// True for roles in [`MENTOR_ROLES`].
    pub fn is_mentor_role(&self) -> bool {
        MENTOR_ROLES.contains(self)
    }

    /// True for roles in [`ADMIN_ROLES`].
    pub fn is_group_admin(&self) -> bool {
        ADMIN_ROLES.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("role", format!("unknown role '{}'", s)))
    }
}
