//! Session command and query handlers.

mod create_session;
mod delete_session;
mod get_session;
mod join_session;
mod list_sessions;
mod update_attendance;
mod update_session;
mod views;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use delete_session::{DeleteSessionCommand, DeleteSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use join_session::{JoinSessionCommand, JoinSessionHandler};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery, ListingView};
pub use update_attendance::{UpdateAttendanceCommand, UpdateAttendanceHandler};
pub use update_session::{UpdateSessionCommand, UpdateSessionHandler};
pub use views::{AttendeeEntry, SessionListing, SessionWithAttendees, StudentSessionEntry};
