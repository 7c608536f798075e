//! Assembles the API router from ports.
//!
//! ```text
//! /health                     liveness, no auth
//! /api/calendar/:user_id      token in query string, no session auth
//! /api/sessions/...           ┐
//! /api/user/...               ├ behind auth_middleware
//! /api/admin/groups           ┘
//! ```

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};

use super::admin::{admin_routes, AdminHandlers};
use super::calendar::{calendar_routes, CalendarHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::session::{session_routes, SessionHandlers};
use super::user::{user_routes, UserHandlers};
use crate::application::handlers::{
    CreateGroupHandler, CreateSessionHandler, DeleteGroupHandler, DeleteSessionHandler,
    FeedSettings, GetCalendarFeedHandler, GetCalendarTokenHandler, GetCurrentUserHandler,
    GetSessionHandler, JoinSessionHandler, ListGroupsHandler, ListSessionsHandler,
    RotateCalendarTokenHandler, UpdateAttendanceHandler, UpdateGroupHandler,
    UpdateSessionHandler,
};
use crate::application::MembershipResolver;
use crate::ports::{
    AttendanceRepository, GroupRepository, SessionRepository, SessionValidator, UserRepository,
};

/// The storage ports the API runs on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub attendances: Arc<dyn AttendanceRepository>,
}

impl Repositories {
    /// All four ports served by one store.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + GroupRepository + SessionRepository + AttendanceRepository + 'static,
    {
        Self {
            users: store.clone(),
            groups: store.clone(),
            sessions: store.clone(),
            attendances: store,
        }
    }
}

/// Router-level settings taken from configuration.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub session_cookie: String,
    pub feed: FeedSettings,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            session_cookie: "session".to_string(),
            feed: FeedSettings::default(),
        }
    }
}

/// Builds `/health` plus everything under `/api`.
pub fn api_router(
    repos: Repositories,
    validator: Arc<dyn SessionValidator>,
    settings: ApiSettings,
) -> Router {
    let resolver = Arc::new(MembershipResolver::new(
        repos.users.clone(),
        repos.groups.clone(),
    ));

    let sessions = SessionHandlers::new(
        Arc::new(ListSessionsHandler::new(
            repos.sessions.clone(),
            repos.attendances.clone(),
            repos.users.clone(),
            repos.groups.clone(),
            resolver.clone(),
        )),
        Arc::new(GetSessionHandler::new(
            repos.sessions.clone(),
            repos.attendances.clone(),
            repos.users.clone(),
            repos.groups.clone(),
            resolver.clone(),
        )),
        Arc::new(CreateSessionHandler::new(
            repos.sessions.clone(),
            repos.groups.clone(),
        )),
        Arc::new(UpdateSessionHandler::new(
            repos.sessions.clone(),
            repos.groups.clone(),
        )),
        Arc::new(DeleteSessionHandler::new(repos.sessions.clone())),
        Arc::new(JoinSessionHandler::new(
            repos.sessions.clone(),
            repos.attendances.clone(),
            resolver.clone(),
        )),
        Arc::new(UpdateAttendanceHandler::new(
            repos.sessions.clone(),
            repos.attendances.clone(),
        )),
    );

    let user = UserHandlers::new(
        Arc::new(GetCurrentUserHandler::new(resolver.clone())),
        Arc::new(GetCalendarTokenHandler::new(
            repos.users.clone(),
            resolver.clone(),
        )),
        Arc::new(RotateCalendarTokenHandler::new(
            repos.users.clone(),
            resolver,
        )),
    );

    let admin = AdminHandlers::new(
        Arc::new(ListGroupsHandler::new(
            repos.groups.clone(),
            repos.users.clone(),
        )),
        Arc::new(CreateGroupHandler::new(repos.groups.clone())),
        Arc::new(UpdateGroupHandler::new(repos.groups.clone())),
        Arc::new(DeleteGroupHandler::new(repos.groups.clone())),
    );

    let calendar = CalendarHandlers::new(Arc::new(GetCalendarFeedHandler::new(
        repos.users,
        repos.groups,
        repos.attendances,
        settings.feed,
    )));

    let auth = AuthState::new(validator, settings.session_cookie);

    let protected = Router::new()
        .nest("/sessions", session_routes(sessions))
        .nest("/user", user_routes(user))
        .nest("/admin", admin_routes(admin))
        .layer(middleware::from_fn_with_state(auth, auth_middleware));

    let api = protected.nest("/calendar", calendar_routes(calendar));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// GET /health - Liveness
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
