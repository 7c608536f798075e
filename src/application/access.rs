//! Request-level access gates.
//!
//! Three independent gates guard the API:
//!
//! ```text
//! capability   has_permission(role, resource:action)   read/join routes
//! mentor gate  role in MENTOR_ROLES                    session management
//! admin gate   role in ADMIN_ROLES                     group administration
//! ```
//!
//! The mentor and admin gates are plain allow-lists, separate from the
//! permission table. Every denial is logged at `warn`
//! with the caller, their role, the action and the reason.

use crate::domain::access::Permission;
use crate::domain::foundation::{AuthenticatedUser, AuthorizationResult};
use crate::domain::group::GroupError;
use crate::domain::session::SessionError;

/// A denied access decision, already logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub reason: String,
}

impl AccessDenied {
    fn logged(caller: &AuthenticatedUser, action: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log_denied(caller, action, &reason);
        Self { reason }
    }
}

impl From<AccessDenied> for SessionError {
    fn from(denied: AccessDenied) -> Self {
        SessionError::Forbidden(denied.reason)
    }
}

impl From<AccessDenied> for GroupError {
    fn from(_: AccessDenied) -> Self {
        GroupError::Forbidden
    }
}

/// Emits the audit line for a refused request.
pub fn log_denied(caller: &AuthenticatedUser, action: &str, reason: &str) {
    tracing::warn!(
        user_id = %caller.id,
        role = %caller.role,
        action = action,
        reason = reason,
        "Access denied"
    );
}

/// Capability gate: the caller's role must carry `permission`.
pub fn require_permission(
    caller: &AuthenticatedUser,
    permission: Permission,
    action: &str,
) -> Result<(), AccessDenied> {
    if caller.has_permission(permission) {
        Ok(())
    } else {
        Err(AccessDenied::logged(
            caller,
            action,
            format!("Missing {} permission", permission),
        ))
    }
}

/// Mentor gate: `MENTOR`, `SENIOR_MENTOR`, `ADMIN` or `SUPERADMIN`.
pub fn require_mentor_role(caller: &AuthenticatedUser, action: &str) -> Result<(), AccessDenied> {
    if caller.role.is_mentor_role() {
        Ok(())
    } else {
        Err(AccessDenied::logged(caller, action, "Mentors only"))
    }
}

/// Admin gate: `SENIOR_MENTOR`, `ADMIN` or `SUPERADMIN`.
pub fn require_group_admin(caller: &AuthenticatedUser, action: &str) -> Result<(), AccessDenied> {
    if caller.role.is_group_admin() {
        Ok(())
    } else {
        Err(AccessDenied::logged(
            caller,
            action,
            format!("Role {} may not administer groups", caller.role),
        ))
    }
}

/// Logs a denied resource-level decision and converts it.
pub fn check_resource(
    caller: &AuthenticatedUser,
    action: &str,
    decision: AuthorizationResult,
) -> Result<(), AccessDenied> {
    if decision.is_granted() {
        return Ok(());
    }
    let reason = decision
        .denial_reason
        .unwrap_or_else(|| "Access denied".to_string());
    Err(AccessDenied::logged(caller, action, reason))
}
