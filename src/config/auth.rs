//! Authentication configuration
//!
//! Access tokens are HS256 JWTs issued by the platform's login service and
//! arrive either as a bearer header or in a session cookie.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest signing secret accepted in production.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: SecretString,

    /// Expected `iss` claim
    pub jwt_issuer: String,

    /// Expected `aud` claim; not checked when unset
    #[serde(default)]
    pub jwt_audience: Option<String>,

    /// Cookie consulted when no bearer header is present
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production additionally requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_ISSUER"));
        }
        if self.session_cookie.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_COOKIE"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}

fn default_session_cookie() -> String {
    "session".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, issuer: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            jwt_issuer: issuer.to_string(),
            jwt_audience: None,
            session_cookie: default_session_cookie(),
        }
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = config("", "https://login.test")
            .validate(&Environment::Development)
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequired("AUTH__JWT_SECRET")));
    }

    #[test]
    fn missing_issuer_is_rejected() {
        let err = config("dev-secret", "")
            .validate(&Environment::Development)
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequired("AUTH__JWT_ISSUER")));
    }

    #[test]
    fn short_secret_only_allowed_outside_production() {
        let cfg = config("dev-secret", "https://login.test");
        assert!(cfg.validate(&Environment::Development).is_ok());
        assert!(matches!(
            cfg.validate(&Environment::Production),
            Err(ValidationError::WeakJwtSecret)
        ));

        let strong = config(&"k".repeat(48), "https://login.test");
        assert!(strong.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let cfg = config("super-secret-value", "https://login.test");
        assert!(!format!("{:?}", cfg).contains("super-secret-value"));
    }
}
