//! HTTP handler for the subscribable calendar feed.
//!
//! No session credential is involved; the `token` query parameter is the
//! only proof of access.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::application::handlers::{GetCalendarFeedHandler, GetCalendarFeedQuery};
use crate::domain::foundation::UserId;

#[derive(Clone)]
pub struct CalendarHandlers {
    feed_handler: Arc<GetCalendarFeedHandler>,
}

impl CalendarHandlers {
    pub fn new(feed_handler: Arc<GetCalendarFeedHandler>) -> Self {
        Self { feed_handler }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub token: Option<String>,
}

/// GET /api/calendar/:user_id?token=... - iCalendar feed
pub async fn get_calendar_feed(
    State(handlers): State<CalendarHandlers>,
    Path(user_id): Path<String>,
    Query(params): Query<FeedParams>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid user ID")),
            )
                .into_response()
        }
    };

    let query = GetCalendarFeedQuery {
        user_id,
        token: params.token,
    };

    match handlers.feed_handler.handle(query).await {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "inline; filename=\"calendar.ics\""),
                (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            ],
            body,
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
