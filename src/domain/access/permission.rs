//! Capability permissions and the static role table.
//!
//! Each role lists its permissions in full. There is no inheritance between
//! roles, so MENTOR/SENIOR_MENTOR and ADMIN/SUPERADMIN carry duplicated
//! tables that may diverge later without touching each other.

use serde::Serialize;
use std::fmt;

use super::Role;

/// A `(resource, action)` capability pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Permission {
    resource: &'static str,
    action: &'static str,
}

impl Permission {
    pub const USER_READ: Permission = Permission::new("user", "read");
    pub const USER_UPDATE: Permission = Permission::new("user", "update");
    pub const USER_DELETE: Permission = Permission::new("user", "delete");

    pub const ADMIN_READ: Permission = Permission::new("admin", "read");
    pub const ADMIN_WRITE: Permission = Permission::new("admin", "write");

    pub const SESSION_READ: Permission = Permission::new("session", "read");
    pub const SESSION_CREATE: Permission = Permission::new("session", "create");
    pub const SESSION_UPDATE: Permission = Permission::new("session", "update");
    pub const SESSION_DELETE: Permission = Permission::new("session", "delete");
    pub const SESSION_MANAGE_ATTENDANCE: Permission =
        Permission::new("session", "manage_attendance");

    pub const TIMETABLE_READ: Permission = Permission::new("timetable", "read");
    pub const TIMETABLE_WRITE: Permission = Permission::new("timetable", "write");

    /// Every permission known to the platform.
    pub const ALL: [Permission; 12] = [
        Permission::USER_READ,
        Permission::USER_UPDATE,
        Permission::USER_DELETE,
        Permission::ADMIN_READ,
        Permission::ADMIN_WRITE,
        Permission::SESSION_READ,
        Permission::SESSION_CREATE,
        Permission::SESSION_UPDATE,
        Permission::SESSION_DELETE,
        Permission::SESSION_MANAGE_ATTENDANCE,
        Permission::TIMETABLE_READ,
        Permission::TIMETABLE_WRITE,
    ];

    pub const fn new(resource: &'static str, action: &'static str) -> Self {
        Self { resource, action }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    /// Looks up a known permission by its resource and action names.
    pub fn lookup(resource: &str, action: &str) -> Option<Permission> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.resource == resource && p.action == action)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

const STUDENT_PERMISSIONS: &[Permission] = &[
    Permission::USER_READ,
    Permission::USER_UPDATE,
    Permission::SESSION_READ,
    Permission::TIMETABLE_READ,
];

const MENTOR_PERMISSIONS: &[Permission] = &[
    Permission::USER_READ,
    Permission::USER_UPDATE,
    Permission::SESSION_READ,
    Permission::SESSION_CREATE,
    Permission::SESSION_UPDATE,
    Permission::SESSION_DELETE,
    Permission::SESSION_MANAGE_ATTENDANCE,
    Permission::TIMETABLE_READ,
    Permission::TIMETABLE_WRITE,
];

const SENIOR_MENTOR_PERMISSIONS: &[Permission] = &[
    Permission::USER_READ,
    Permission::USER_UPDATE,
    Permission::SESSION_READ,
    Permission::SESSION_CREATE,
    Permission::SESSION_UPDATE,
    Permission::SESSION_DELETE,
    Permission::SESSION_MANAGE_ATTENDANCE,
    Permission::TIMETABLE_READ,
    Permission::TIMETABLE_WRITE,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::USER_READ,
    Permission::USER_UPDATE,
    Permission::USER_DELETE,
    Permission::ADMIN_READ,
    Permission::ADMIN_WRITE,
    Permission::SESSION_READ,
    Permission::SESSION_CREATE,
    Permission::SESSION_UPDATE,
    Permission::SESSION_DELETE,
    Permission::SESSION_MANAGE_ATTENDANCE,
    Permission::TIMETABLE_READ,
    Permission::TIMETABLE_WRITE,
];

const SUPERADMIN_PERMISSIONS: &[Permission] = &[
    Permission::USER_READ,
    Permission::USER_UPDATE,
    Permission::USER_DELETE,
    Permission::ADMIN_READ,
    Permission::ADMIN_WRITE,
    Permission::SESSION_READ,
    Permission::SESSION_CREATE,
    Permission::SESSION_UPDATE,
    Permission::SESSION_DELETE,
    Permission::SESSION_MANAGE_ATTENDANCE,
    Permission::TIMETABLE_READ,
    Permission::TIMETABLE_WRITE,
];

/// The full permission list for a role.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Student => STUDENT_PERMISSIONS,
        Role::Mentor => MENTOR_PERMISSIONS,
        Role::SeniorMentor => SENIOR_MENTOR_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Superadmin => SUPERADMIN_PERMISSIONS,
    }
}

/// Whether `role` holds `permission`. Pure and total.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Name-based check for callers holding raw strings.
///
/// Unknown roles and unknown `(resource, action)` pairs are never granted.
pub fn has_named_permission(role: &str, resource: &str, action: &str) -> bool {
    let Ok(role) = role.parse::<Role>() else {
        return false;
    };
    Permission::lookup(resource, action)
        .map(|permission| has_permission(role, permission))
        .unwrap_or(false)
}
