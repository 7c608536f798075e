//! Group module - mentor groups and membership rules.

mod aggregate;
mod category;
mod errors;
mod membership;

pub use aggregate::{Group, MAX_INFO_LENGTH};
pub use category::Category;
pub use errors::GroupError;
pub use membership::{check_mentee_assignment, check_mentor_assignment, GroupMembership};
