//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the `SessionValidator` port produces from a
//! credential. It carries the identity and the role claim; everything else
//! about the user (group membership, calendar token) is loaded on demand.

use super::UserId;
use crate::domain::access::{has_permission, Permission, Role};
use thiserror::Error;

/// Authenticated caller extracted from a validated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Email address from the token claims.
    pub email: String,

    /// Display name if available.
    pub display_name: Option<String>,

    /// Platform role carried by the credential.
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            role,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        has_permission(self.role, permission)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token carries a role outside the platform's role set.
    #[error("Unknown role")]
    UnknownRole,

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UnknownRole
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "test@example.com",
            None,
            role,
        )
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(user(Role::Student).display_name_or_email(), "test@example.com");
    }

    #[test]
    fn permission_check_uses_role_table() {
        assert!(user(Role::Mentor).has_permission(Permission::SESSION_CREATE));
        assert!(!user(Role::Student).has_permission(Permission::SESSION_CREATE));
    }

    #[test]
    fn service_unavailable_does_not_require_reauthentication() {
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
        assert!(AuthError::UnknownRole.requires_reauthentication());
    }
}
