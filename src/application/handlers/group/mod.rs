//! Group administration handlers.
//!
//! All of these sit behind the admin allow-list.

mod create_group;
mod delete_group;
mod list_groups;
mod update_group;

pub use create_group::{CreateGroupCommand, CreateGroupHandler};
pub use delete_group::{DeleteGroupCommand, DeleteGroupHandler};
pub use list_groups::{GroupOverview, ListGroupsHandler, ListGroupsQuery};
pub use update_group::{UpdateGroupCommand, UpdateGroupHandler};
