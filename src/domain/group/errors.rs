//! Group-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, GroupId};

/// Group administration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// Group was not found.
    NotFound(GroupId),
    /// A referenced user does not exist.
    UnknownUser(String),
    /// A mentor or mentee is already attached to another group.
    Conflict(String),
    /// Caller's role may not administer groups.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl GroupError {
    pub fn not_found(id: GroupId) -> Self {
        GroupError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        GroupError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GroupError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        GroupError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            GroupError::NotFound(_) => ErrorCode::GroupNotFound,
            GroupError::UnknownUser(_) => ErrorCode::UserNotFound,
            GroupError::Conflict(_) => ErrorCode::MenteeAlreadyAssigned,
            GroupError::Forbidden => ErrorCode::Forbidden,
            GroupError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            GroupError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            GroupError::NotFound(id) => format!("Group not found: {}", id),
            GroupError::UnknownUser(id) => format!("User not found: {}", id),
            GroupError::Conflict(msg) => msg.clone(),
            GroupError::Forbidden => "Permission denied".to_string(),
            GroupError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            GroupError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for GroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GroupError {}

impl From<DomainError> for GroupError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::GroupNotFound => match err.detail("group_id").map(str::parse) {
                Some(Ok(id)) => GroupError::NotFound(id),
                _ => GroupError::Infrastructure(err.to_string()),
            },
            ErrorCode::UserNotFound => GroupError::UnknownUser(
                err.detail("user_id").unwrap_or("unknown").to_string(),
            ),
            ErrorCode::MentorAlreadyAssigned | ErrorCode::MenteeAlreadyAssigned => {
                GroupError::Conflict(err.message)
            }
            ErrorCode::Forbidden => GroupError::Forbidden,
            ErrorCode::ValidationFailed => GroupError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => GroupError::Infrastructure(err.to_string()),
        }
    }
}
