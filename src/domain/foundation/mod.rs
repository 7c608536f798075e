//! Foundation module - shared value objects, identifiers, and error types.
//!
//! Everything else in the domain builds on these types.

mod auth;
mod authorization;
mod command;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use authorization::{Authorizable, AuthorizationResult};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AttendanceId, GroupId, SessionId, UserId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
