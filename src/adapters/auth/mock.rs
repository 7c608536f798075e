//! Mock session validator for testing.
//!
//! Maps fixed tokens to callers so HTTP tests can authenticate as any role
//! without signing JWTs.
//!
//! # Example
//!
//! ```ignore
//! use mentorhub::adapters::auth::MockSessionValidator;
//! use mentorhub::domain::access::Role;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("mentor-token", mentor_id, Role::Mentor);
//!
//! let caller = validator.validate("mentor-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::access::Role;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Token-to-caller lookup. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation while set
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `token` as `user`.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Accepts `token` as a caller with the given id and role.
    pub fn with_test_user(self, token: impl Into<String>, user_id: UserId, role: Role) -> Self {
        let user = AuthenticatedUser::new(
            user_id.clone(),
            format!("{}@test.mentorhub.dev", user_id),
            Some(format!("Test {} {}", role, user_id)),
            role,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[tokio::test]
    async fn returns_user_for_registered_token() {
        let validator =
            MockSessionValidator::new().with_test_user("valid-token", uid("m-1"), Role::Mentor);

        let user = validator.validate("valid-token").await.unwrap();

        assert_eq!(user.id.as_str(), "m-1");
        assert_eq!(user.role, Role::Mentor);
        assert!(user.email.contains("m-1"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        let result = validator.validate("unknown-token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn forced_error_wins_until_cleared() {
        let validator = MockSessionValidator::new()
            .with_test_user("t", uid("s-1"), Role::Student)
            .with_error(AuthError::service_unavailable("down"));

        assert!(matches!(
            validator.validate("t").await,
            Err(AuthError::ServiceUnavailable(_))
        ));

        validator.clear_error();
        assert!(validator.validate("t").await.is_ok());
    }

    #[tokio::test]
    async fn tokens_can_be_added_and_removed_at_runtime() {
        let validator = MockSessionValidator::new();
        let user = AuthenticatedUser::new(uid("a-1"), "a@uni.test", None, Role::Admin);

        validator.add_token("new-token", user);
        assert!(validator.validate("new-token").await.is_ok());

        validator.remove_token("new-token");
        assert!(validator.validate("new-token").await.is_err());
    }
}
