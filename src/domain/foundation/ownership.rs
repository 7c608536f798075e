//! Ownership trait for user-owned resources.
//!
//! Ownership failures are reported by callers, not here: session routes
//! conflate "missing" and "not yours" into one not-found response, so the
//! trait only answers the question.

use super::UserId;

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}
