//! HTTP routes for the calendar feed.

use axum::{routing::get, Router};

use super::handlers::{get_calendar_feed, CalendarHandlers};

/// Creates the calendar router, mounted at `/calendar` outside the auth layer.
pub fn calendar_routes(handlers: CalendarHandlers) -> Router {
    Router::new()
        .route("/:user_id", get(get_calendar_feed))
        .with_state(handlers)
}
