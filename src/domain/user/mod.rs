//! User module - accounts referenced by sessions, groups, and feeds.

mod aggregate;

pub use aggregate::User;
