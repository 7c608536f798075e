//! HTTP adapter for group administration.

mod dto;
mod handlers;
mod routes;

pub use dto::{DeleteGroupRequest, GroupOverviewResponse, GroupResponse, UpdateGroupRequest};
pub use handlers::AdminHandlers;
pub use routes::admin_routes;
