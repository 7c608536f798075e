//! Access module - roles and capability permissions.
//!
//! Two independent gates exist on purpose:
//!
//! - capability checks (`has_permission`) guard reads and self-join
//! - role allow-lists (`MENTOR_ROLES`, `ADMIN_ROLES`) guard management routes
//!
//! Outcomes of both gates agree with the permission table for every role.

mod permission;
mod role;

pub use permission::{has_named_permission, has_permission, permissions_for, Permission};
pub use role::{Role, ADMIN_ROLES, MENTOR_ROLES};
