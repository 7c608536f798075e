//! HTTP error responses.
//!
//! Every handler error funnels through [`ApiError`], so the status and body
//! code for a given failure are decided in one place.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::calendar::CalendarError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::group::GroupError;
use crate::domain::session::SessionError;

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new("UNAUTHENTICATED", message)
    }
}

/// A request failure, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    ValidationFailed(String),
    Unauthenticated,
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    CapacityExceeded(String),
    /// Logged, never echoed.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::ValidationFailed(_)
            | ApiError::CapacityExceeded(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::CapacityExceeded(_) => "CAPACITY_EXCEEDED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Authentication required".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
            ApiError::BadRequest(msg)
            | ApiError::ValidationFailed(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::CapacityExceeded(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            tracing::error!(error = %cause, "Request failed");
        }
        let body = ErrorResponse::new(self.code(), self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Conversions
// ════════════════════════════════════════════════════════════════════════════

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(_) => ApiError::NotFound(err.message()),
            SessionError::Forbidden(reason) => ApiError::Forbidden(reason),
            SessionError::NoGroupAssigned => ApiError::BadRequest(err.message()),
            SessionError::CapacityExceeded { .. } => ApiError::CapacityExceeded(err.message()),
            SessionError::AlreadyRegistered => ApiError::Conflict(err.message()),
            SessionError::ValidationFailed { .. } => ApiError::ValidationFailed(err.message()),
            SessionError::Infrastructure(cause) => ApiError::Internal(cause),
        }
    }
}

impl From<GroupError> for ApiError {
    fn from(err: GroupError) -> Self {
        match err {
            GroupError::NotFound(_) | GroupError::UnknownUser(_) => {
                ApiError::NotFound(err.message())
            }
            GroupError::Conflict(msg) => ApiError::Conflict(msg),
            GroupError::Forbidden => ApiError::Forbidden(err.message()),
            GroupError::ValidationFailed { .. } => ApiError::ValidationFailed(err.message()),
            GroupError::Infrastructure(cause) => ApiError::Internal(cause),
        }
    }
}

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::AccessDenied => ApiError::Forbidden(err.to_string()),
            CalendarError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            CalendarError::Infrastructure(cause) => ApiError::Internal(cause),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ApiError::Forbidden(err.message),
            ErrorCode::ValidationFailed => ApiError::ValidationFailed(err.message),
            ErrorCode::UserNotFound | ErrorCode::GroupNotFound | ErrorCode::SessionNotFound => {
                ApiError::NotFound(err.message)
            }
            ErrorCode::AlreadyRegistered
            | ErrorCode::MentorAlreadyAssigned
            | ErrorCode::MenteeAlreadyAssigned => ApiError::Conflict(err.message),
            ErrorCode::CapacityExceeded => ApiError::CapacityExceeded(err.message),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}
