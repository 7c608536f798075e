//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::command_metadata;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    GetCalendarTokenHandler, GetCalendarTokenQuery, GetCurrentUserHandler, GetCurrentUserQuery,
    RotateCalendarTokenCommand, RotateCalendarTokenHandler,
};

use super::dto::{CalendarTokenResponse, CurrentUserResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UserHandlers {
    current_user_handler: Arc<GetCurrentUserHandler>,
    get_token_handler: Arc<GetCalendarTokenHandler>,
    rotate_token_handler: Arc<RotateCalendarTokenHandler>,
}

impl UserHandlers {
    pub fn new(
        current_user_handler: Arc<GetCurrentUserHandler>,
        get_token_handler: Arc<GetCalendarTokenHandler>,
        rotate_token_handler: Arc<RotateCalendarTokenHandler>,
    ) -> Self {
        Self {
            current_user_handler,
            get_token_handler,
            rotate_token_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/user - Caller profile, group membership and permissions
pub async fn get_current_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetCurrentUserQuery { caller: user };

    match handlers.current_user_handler.handle(query).await {
        Ok(current) => {
            let response: CurrentUserResponse = current.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /api/user/calendar-token - Get or create the feed token
pub async fn get_calendar_token(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetCalendarTokenQuery { caller: user };

    match handlers.get_token_handler.handle(query).await {
        Ok(token) => (StatusCode::OK, Json(CalendarTokenResponse::from(token))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/user/calendar-token - Rotate the feed token
pub async fn rotate_calendar_token(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let metadata = command_metadata(&user);
    let cmd = RotateCalendarTokenCommand { caller: user };

    match handlers.rotate_token_handler.handle(cmd, metadata).await {
        Ok(token) => (StatusCode::OK, Json(CalendarTokenResponse::from(token))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
