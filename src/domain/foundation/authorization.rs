//! Authorization support types.
//!
//! The concrete guard that logs decisions lives in the application layer
//! (`application::access`). This module only provides the result type
//! so every denial carries the same "who, what, why" context.

use super::{DomainError, ErrorCode, UserId};

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// The resource type being accessed (e.g., "Session", "Group").
    pub resource_type: &'static str,

    /// The ID of the resource being accessed.
    pub resource_id: String,

    /// The user who requested access.
    pub user_id: String,

    /// Reason for denial (if denied).
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    pub fn granted(
        resource_type: &'static str,
        resource_id: impl Into<String>,
        user_id: &UserId,
    ) -> Self {
        Self {
            granted: true,
            resource_type,
            resource_id: resource_id.into(),
            user_id: user_id.to_string(),
            denial_reason: None,
        }
    }

    pub fn denied(
        resource_type: &'static str,
        resource_id: impl Into<String>,
        user_id: &UserId,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            granted: false,
            resource_type,
            resource_id: resource_id.into(),
            user_id: user_id.to_string(),
            denial_reason: Some(reason.into()),
        }
    }

    /// Converts this result to a `Result<(), DomainError>`.
    ///
    /// Returns `Ok(())` if granted, `Err(Forbidden)` if denied.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                self.denial_reason
                    .unwrap_or_else(|| "Access denied".to_string()),
            )
            .with_detail("resource_type", self.resource_type)
            .with_detail("resource_id", self.resource_id)
            .with_detail("user_id", self.user_id))
        }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

/// Implemented by resources that appear in authorization logs.
pub trait Authorizable {
    const RESOURCE_TYPE: &'static str;

    fn resource_id(&self) -> String;
}
