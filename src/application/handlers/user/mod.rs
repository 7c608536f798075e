//! User profile handlers.

mod get_current_user;

pub use get_current_user::{CurrentUser, GetCurrentUserHandler, GetCurrentUserQuery};
