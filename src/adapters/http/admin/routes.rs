//! HTTP routes for group administration.

use axum::{routing::get, Router};

use super::handlers::{create_group, delete_group, list_groups, update_group, AdminHandlers};

/// Creates the admin router, mounted at `/admin`.
pub fn admin_routes(handlers: AdminHandlers) -> Router {
    Router::new()
        .route(
            "/groups",
            get(list_groups)
                .post(create_group)
                .put(update_group)
                .delete(delete_group),
        )
        .with_state(handlers)
}
