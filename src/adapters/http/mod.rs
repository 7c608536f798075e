//! HTTP adapters - REST API implementations.
//!
//! Each area has its own `dto`/`handlers`/`routes` split; [`api_router`]
//! mounts them all.

pub mod admin;
pub mod calendar;
pub mod error;
pub mod middleware;
pub mod router;
pub mod session;
pub mod user;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, ApiSettings, Repositories};

use crate::domain::foundation::{AuthenticatedUser, CommandMetadata};

/// Metadata for a command issued by `user` over HTTP, with a fresh
/// correlation id.
pub(crate) fn command_metadata(user: &AuthenticatedUser) -> CommandMetadata {
    CommandMetadata::new(user.id.clone()).with_correlation_id(uuid::Uuid::new_v4().to_string())
}
