//! HTTP routes for user endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_calendar_token, get_current_user, rotate_calendar_token, UserHandlers};

/// Creates the user router, mounted at `/user`.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/", get(get_current_user))
        .route(
            "/calendar-token",
            get(get_calendar_token).post(rotate_calendar_token),
        )
        .with_state(handlers)
}
