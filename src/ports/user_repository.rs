//! User repository port.
//!
//! Accounts are created from credential claims on first sight; after that
//! the only per-user state the engine writes is the calendar token.

use async_trait::async_trait;

use crate::domain::calendar::CalendarToken;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace an account.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Insert `user` unless an account with the same ID exists, then return
    /// the stored account.
    ///
    /// An existing row is left untouched, so a concurrent provisioning never
    /// clears a calendar token or group assignment written in between.
    async fn insert_if_absent(&self, user: &User) -> Result<User, DomainError>;

    /// Find a user by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find all users among `ids`. Unknown IDs are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Store `candidate` only if the user has no token yet, then return the
    /// stored token.
    ///
    /// Concurrent first calls converge on a single token.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn ensure_calendar_token(
        &self,
        id: &UserId,
        candidate: &CalendarToken,
    ) -> Result<CalendarToken, DomainError>;

    /// Unconditionally replace the user's token.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn replace_calendar_token(
        &self,
        id: &UserId,
        token: &CalendarToken,
    ) -> Result<(), DomainError>;
}
