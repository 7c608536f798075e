//! Calendar token and feed handlers.

mod calendar_token;
mod get_calendar_feed;

pub use calendar_token::{
    GetCalendarTokenHandler, GetCalendarTokenQuery, RotateCalendarTokenCommand,
    RotateCalendarTokenHandler,
};
pub use get_calendar_feed::{FeedSettings, GetCalendarFeedHandler, GetCalendarFeedQuery};
