//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Session and attendance errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found, or is not owned by the caller on owner-only routes.
    NotFound(SessionId),
    /// Caller is not allowed to perform the operation.
    Forbidden(String),
    /// Mentor-role caller has no group to create sessions in.
    NoGroupAssigned,
    /// Extra-capacity limit reached.
    CapacityExceeded { current: u32, max: u32 },
    /// Caller already holds an attendance for the session.
    AlreadyRegistered,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn forbidden(reason: impl Into<String>) -> Self {
        SessionError::Forbidden(reason.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Forbidden(_) => ErrorCode::Forbidden,
            SessionError::NoGroupAssigned => ErrorCode::GroupNotFound,
            SessionError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            SessionError::AlreadyRegistered => ErrorCode::AlreadyRegistered,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(_) => "Session not found or unauthorized".to_string(),
            SessionError::Forbidden(reason) => reason.clone(),
            SessionError::NoGroupAssigned => "Mentor not assigned to a group".to_string(),
            SessionError::CapacityExceeded { current, max } => format!(
                "Session is full (extra capacity limit reached: {}/{})",
                current, max
            ),
            SessionError::AlreadyRegistered => "Already registered for this session".to_string(),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => match err.detail("session_id").map(str::parse) {
                Some(Ok(id)) => SessionError::NotFound(id),
                _ => SessionError::Infrastructure(err.to_string()),
            },
            ErrorCode::Forbidden => SessionError::Forbidden(err.message),
            ErrorCode::CapacityExceeded => {
                let read = |key: &str| {
                    err.detail(key)
                        .and_then(|v| v.parse::<u32>().ok())
                        .unwrap_or(0)
                };
                SessionError::CapacityExceeded {
                    current: read("current"),
                    max: read("max_capacity"),
                }
            }
            ErrorCode::AlreadyRegistered => SessionError::AlreadyRegistered,
            ErrorCode::UserNotFound => SessionError::ValidationFailed {
                field: "user_id".to_string(),
                message: err.message,
            },
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_error_recovers_counts() {
        let err = DomainError::new(ErrorCode::CapacityExceeded, "full")
            .with_detail("current", "3")
            .with_detail("max_capacity", "3");
        assert_eq!(
            SessionError::from(err),
            SessionError::CapacityExceeded { current: 3, max: 3 }
        );
    }

    #[test]
    fn validation_error_keeps_field() {
        let err = DomainError::validation("title", "Title cannot be empty");
        assert_eq!(
            SessionError::from(err),
            SessionError::validation("title", "Title cannot be empty")
        );
    }

    #[test]
    fn duplicate_maps_to_already_registered() {
        let err = DomainError::new(ErrorCode::AlreadyRegistered, "dup");
        assert_eq!(SessionError::from(err), SessionError::AlreadyRegistered);
    }

    #[test]
    fn forbidden_keeps_reason() {
        let err = DomainError::new(ErrorCode::Forbidden, "You cannot join this session");
        assert_eq!(
            SessionError::from(err).message(),
            "You cannot join this session"
        );
    }

    #[test]
    fn unknown_codes_become_infrastructure() {
        let err = DomainError::new(ErrorCode::DatabaseError, "connection reset");
        assert!(matches!(SessionError::from(err), SessionError::Infrastructure(_)));
    }
}
