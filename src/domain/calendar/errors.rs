//! Calendar-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Feed request without a valid token for the named user.
    ///
    /// Unknown users land here too, so callers cannot tell them apart.
    #[error("Invalid or missing calendar token")]
    AccessDenied,

    /// Token operations for an account that does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl CalendarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CalendarError::AccessDenied => ErrorCode::Forbidden,
            CalendarError::UserNotFound(_) => ErrorCode::UserNotFound,
            CalendarError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for CalendarError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UserNotFound => match err.detail("user_id").map(UserId::new) {
                Some(Ok(id)) => CalendarError::UserNotFound(id),
                _ => CalendarError::Infrastructure(err.to_string()),
            },
            _ => CalendarError::Infrastructure(err.to_string()),
        }
    }
}
