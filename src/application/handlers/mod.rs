//! Command and query handlers.
//!
//! Each handler takes its ports as `Arc<dyn ...>`, applies the access gate
//! for its route, then calls into the domain and repositories.

pub mod calendar;
pub mod group;
pub mod session;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use calendar::{
    FeedSettings, GetCalendarFeedHandler, GetCalendarFeedQuery, GetCalendarTokenHandler,
    GetCalendarTokenQuery, RotateCalendarTokenCommand, RotateCalendarTokenHandler,
};
pub use group::{
    CreateGroupCommand, CreateGroupHandler, DeleteGroupCommand, DeleteGroupHandler,
    GroupOverview, ListGroupsHandler, ListGroupsQuery, UpdateGroupCommand, UpdateGroupHandler,
};
pub use session::{
    AttendeeEntry, CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    DeleteSessionCommand, DeleteSessionHandler, GetSessionHandler, GetSessionQuery,
    JoinSessionCommand, JoinSessionHandler, ListSessionsHandler, ListSessionsQuery, ListingView,
    SessionListing, SessionWithAttendees, StudentSessionEntry, UpdateAttendanceCommand,
    UpdateAttendanceHandler, UpdateSessionCommand, UpdateSessionHandler,
};
pub use user::{CurrentUser, GetCurrentUserHandler, GetCurrentUserQuery};
