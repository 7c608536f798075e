//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::adapters::http::command_metadata;
use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    CreateSessionCommand, CreateSessionHandler, DeleteSessionCommand, DeleteSessionHandler,
    GetSessionHandler, GetSessionQuery, JoinSessionCommand, JoinSessionHandler,
    ListSessionsHandler, ListSessionsQuery, ListingView, UpdateAttendanceCommand,
    UpdateAttendanceHandler, UpdateSessionCommand, UpdateSessionHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;

use super::dto::{
    AttendanceResponse, CreateSessionResponse, SessionDetailResponse, SessionListResponse,
    SessionRequest, SessionResponse, UpdateAttendanceRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    list_handler: Arc<ListSessionsHandler>,
    get_handler: Arc<GetSessionHandler>,
    create_handler: Arc<CreateSessionHandler>,
    update_handler: Arc<UpdateSessionHandler>,
    delete_handler: Arc<DeleteSessionHandler>,
    join_handler: Arc<JoinSessionHandler>,
    attendance_handler: Arc<UpdateAttendanceHandler>,
}

impl SessionHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        list_handler: Arc<ListSessionsHandler>,
        get_handler: Arc<GetSessionHandler>,
        create_handler: Arc<CreateSessionHandler>,
        update_handler: Arc<UpdateSessionHandler>,
        delete_handler: Arc<DeleteSessionHandler>,
        join_handler: Arc<JoinSessionHandler>,
        attendance_handler: Arc<UpdateAttendanceHandler>,
    ) -> Self {
        Self {
            list_handler,
            get_handler,
            create_handler,
            update_handler,
            delete_handler,
            join_handler,
            attendance_handler,
        }
    }
}

/// Query string of `GET /sessions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSessionsParams {
    #[serde(default)]
    pub view: ListingView,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions?view=student|mentor - List sessions
pub async fn list_sessions(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListSessionsParams>,
) -> Response {
    let query = ListSessionsQuery {
        caller: user,
        view: params.view,
    };

    match handlers.list_handler.handle(query).await {
        Ok(listing) => {
            let response = SessionListResponse::from(&listing);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions - Create a session in the caller's group
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SessionRequest>,
) -> Response {
    let metadata = command_metadata(&user);
    let cmd = CreateSessionCommand {
        caller: user,
        details: req.into(),
    };

    match handlers.create_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = CreateSessionResponse {
                session: SessionResponse::from(&result.session),
                enrolled: result.enrolled.len(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id - Session with all attendances
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetSessionQuery {
        caller: user,
        session_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(view) => {
            let response = SessionDetailResponse::from(&view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// PUT /api/sessions/:id - Update an owned session
pub async fn update_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(req): Json<SessionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let metadata = command_metadata(&user);
    let cmd = UpdateSessionCommand {
        caller: user,
        session_id,
        details: req.into(),
    };

    match handlers.update_handler.handle(cmd, metadata).await {
        Ok(session) => {
            let response = SessionResponse::from(&session);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/sessions/:id - Delete an owned session and its attendances
pub async fn delete_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let metadata = command_metadata(&user);
    let cmd = DeleteSessionCommand {
        caller: user,
        session_id,
    };

    match handlers.delete_handler.handle(cmd, metadata).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/attendance - Join a session
pub async fn join_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let metadata = command_metadata(&user);
    let cmd = JoinSessionCommand {
        caller: user,
        session_id,
    };

    match handlers.join_handler.handle(cmd, metadata).await {
        Ok(attendance) => {
            let response = AttendanceResponse::from(&attendance);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// PUT /api/sessions/:id/attendance - Bulk attendance upsert
pub async fn update_attendance(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateAttendanceRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let updates = match req.into_updates() {
        Ok(updates) => updates,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let metadata = command_metadata(&user);
    let cmd = UpdateAttendanceCommand {
        caller: user,
        session_id,
        updates,
    };

    match handlers.attendance_handler.handle(cmd, metadata).await {
        Ok(updated) => {
            let response: Vec<AttendanceResponse> = updated.iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_session_error(error: SessionError) -> Response {
    ApiError::from(error).into_response()
}
