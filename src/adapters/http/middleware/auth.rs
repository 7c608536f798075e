//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates credentials and injects the caller into extensions
//! - `RequireAuth` - Extractor that requires authentication
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, keeping it provider-agnostic.
//! The JWT validator and the mock used in tests plug in the same way.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get, middleware};
//! use std::sync::Arc;
//!
//! let validator: Arc<dyn SessionValidator> = Arc::new(MockSessionValidator::new());
//! let state = AuthState::new(validator, "session");
//!
//! let app = Router::new()
//!     .route("/api/protected", get(protected_handler))
//!     .layer(middleware::from_fn_with_state(state, auth_middleware));
//!
//! async fn protected_handler(RequireAuth(user): RequireAuth) -> String {
//!     format!("Hello, {}!", user.email)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - the session validator plus the cookie it may read.
#[derive(Clone)]
pub struct AuthState {
    validator: Arc<dyn SessionValidator>,
    cookie_name: Arc<str>,
}

impl AuthState {
    pub fn new(validator: Arc<dyn SessionValidator>, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            validator,
            cookie_name: cookie_name.into(),
        }
    }
}

/// Authentication middleware.
///
/// This middleware:
/// 1. Takes the credential from the `Authorization: Bearer` header, else
///    from the session cookie
/// 2. Validates it using the `SessionValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing credential, continues without injecting
/// 5. On invalid credential, returns 401 Unauthorized
///
/// ```text
/// Authorization: Bearer <token>
/// Cookie: session=<token>
/// ```
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers())
        .or_else(|| cookie_value(request.headers(), &auth.cookie_name))
        .map(str::to_string);

    let Some(token) = token else {
        // Handlers use RequireAuth to enforce authentication
        return next.run(request).await;
    };

    match auth.validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let (status, body) = match &e {
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Auth service unavailable: {}", msg);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        ErrorResponse::new(
                            "SERVICE_UNAVAILABLE",
                            "Authentication service unavailable",
                        ),
                    )
                }
                AuthError::TokenExpired => (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::unauthenticated("Token expired"),
                ),
                AuthError::InvalidToken | AuthError::UnknownRole => (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::unauthenticated("Invalid credentials"),
                ),
            };
            (status, Json(body)).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|v| !v.is_empty())
}

/// Extractor that requires authentication.
///
/// Use this extractor in handlers that require an authenticated user.
/// If no user is in the request extensions (i.e., auth middleware didn't
/// successfully validate a token), returns 401 Unauthorized.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthenticated("Authentication required")),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::access::Role;
    use crate::domain::foundation::UserId;
    use axum::{body::Body, extract::FromRequestParts, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "test@uni.test",
            Some("Test User".to_string()),
            Role::Student,
        )
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state = AuthState::new(Arc::new(validator), "session");
        Router::new()
            .route(
                "/whoami",
                get(|RequireAuth(user): RequireAuth| async move { user.id.to_string() }),
            )
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn status_for(app: Router, request: axum::http::Request<Body>) -> StatusCode {
        app.oneshot(request).await.unwrap().status()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn bearer_token_authenticates() {
        let app = app(MockSessionValidator::new().with_user("valid-token", test_user()));
        let request = axum::http::Request::builder()
            .uri("/whoami")
            .header("Authorization", "Bearer valid-token")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_for(app, request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn session_cookie_authenticates() {
        let app = app(MockSessionValidator::new().with_user("cookie-token", test_user()));
        let request = axum::http::Request::builder()
            .uri("/whoami")
            .header("Cookie", "theme=dark; session=cookie-token")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_for(app, request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_before_the_handler() {
        let app = app(MockSessionValidator::new());
        let request = axum::http::Request::builder()
            .uri("/whoami")
            .header("Authorization", "Bearer nope")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_for(app, request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_role_is_unauthorized() {
        let app = app(MockSessionValidator::new().with_error(AuthError::UnknownRole));
        let request = axum::http::Request::builder()
            .uri("/whoami")
            .header("Authorization", "Bearer anything")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_for(app, request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn provider_outage_is_503() {
        let app = app(
            MockSessionValidator::new().with_error(AuthError::service_unavailable("timeout")),
        );
        let request = axum::http::Request::builder()
            .uri("/whoami")
            .header("Authorization", "Bearer anything")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_for(app, request).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn missing_credential_reaches_extractor_and_fails() {
        let app = app(MockSessionValidator::new());
        let request = axum::http::Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();

        assert_eq!(status_for(app, request).await, StatusCode::UNAUTHORIZED);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Credential extraction
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer my-token".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("my-token"));
    }

    #[test]
    fn cookie_lookup_matches_exact_name() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "session_id=wrong; session=right".parse().unwrap(),
        );
        assert_eq!(cookie_value(&headers, "session"), Some("right"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractors
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());
        let (mut parts, _body) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.email, "test@uni.test");
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }
}
