//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, delete_session, get_session, join_session, list_sessions, update_attendance,
    update_session, SessionHandlers,
};

/// Creates the session router, mounted at `/sessions`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route(
            "/:id",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route(
            "/:id/attendance",
            post(join_session).put(update_attendance),
        )
        .with_state(handlers)
}
