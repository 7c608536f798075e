//! HTTP adapter for the caller's profile and calendar token.

mod dto;
mod handlers;
mod routes;

pub use dto::{CalendarTokenResponse, CurrentUserResponse, GroupRefResponse, UserSummaryResponse};
pub use handlers::UserHandlers;
pub use routes::user_routes;
