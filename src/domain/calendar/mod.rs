//! Calendar module - feed tokens and iCalendar rendering.

mod errors;
mod feed;
mod token;

pub use errors::CalendarError;
pub use feed::{CalendarFeed, FeedEvent, Organizer};
pub use token::{CalendarToken, TOKEN_BYTES};
