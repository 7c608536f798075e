//! Session module - mentoring sessions, eligibility, and capacity.

mod aggregate;
mod capacity;
mod eligibility;
mod errors;

pub use aggregate::{MentoringSession, SessionDetails, MAX_TITLE_LENGTH};
pub use capacity::ExtraCapacity;
pub use eligibility::{authorize_join, authorize_view, can_join, can_view, Viewer};
pub use errors::SessionError;
