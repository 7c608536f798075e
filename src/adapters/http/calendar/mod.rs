//! HTTP adapter for the calendar feed.

mod handlers;
mod routes;

pub use handlers::{CalendarHandlers, FeedParams};
pub use routes::calendar_routes;
