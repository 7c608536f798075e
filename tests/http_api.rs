//! End-to-end tests for the HTTP API.
//!
//! Each test builds the full router over an in-memory store and drives it
//! with `oneshot` requests, authenticating through a fixed token table.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mentorhub::adapters::auth::MockSessionValidator;
use mentorhub::adapters::http::{api_router, ApiSettings, Repositories};
use mentorhub::adapters::memory::InMemoryStore;
use mentorhub::domain::access::Role;
use mentorhub::domain::foundation::UserId;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Token for each test user is `"<id>-token"`.
const USERS: &[(&str, Role)] = &[
    ("admin", Role::Admin),
    ("m", Role::Mentor),
    ("a", Role::Student),
    ("b", Role::Student),
    ("c", Role::Student),
    ("d", Role::Student),
];

struct TestApp {
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let mut validator = MockSessionValidator::new();
        for (id, role) in USERS {
            validator =
                validator.with_test_user(format!("{}-token", id), UserId::new(*id).unwrap(), *role);
        }

        let router = api_router(
            Repositories::from_store(Arc::new(InMemoryStore::new())),
            Arc::new(validator),
            ApiSettings::default(),
        );
        Self { router }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        as_user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = as_user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}-token", user));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    /// First contact provisions the user's account.
    async fn sign_in(&self, user: &str) {
        let (status, _) = self.call(Method::GET, "/api/user", Some(user), None).await;
        assert_eq!(status, StatusCode::OK, "sign-in for {}", user);
    }

    /// Group with mentor `m` and mentees `a`, `b`.
    async fn seed_group(&self) -> String {
        for user in ["m", "a", "b", "c", "d"] {
            self.sign_in(user).await;
        }

        let (status, group) = self
            .call(Method::POST, "/api/admin/groups", Some("admin"), None)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let group_id = group["id"].as_str().unwrap().to_string();

        let (status, _) = self
            .call(
                Method::PUT,
                "/api/admin/groups",
                Some("admin"),
                Some(json!({
                    "id": group_id,
                    "mentor_id": "m",
                    "mentee_ids": ["a", "b"],
                    "category": "CS_BSC_MENG"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        group_id
    }

    async fn create_session(&self, title: &str, is_public: bool, max_capacity: u32) -> Value {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/sessions",
                Some("m"),
                Some(json!({
                    "title": title,
                    "date": "2031-03-01T17:00:00Z",
                    "location": "Huxley 218",
                    "is_public": is_public,
                    "max_capacity": max_capacity
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }

    async fn join(&self, session_id: &str, user: &str) -> (StatusCode, Value) {
        self.call(
            Method::POST,
            &format!("/api/sessions/{}/attendance", session_id),
            Some(user),
            None,
        )
        .await
    }
}

// =============================================================================
// Health and Authentication
// =============================================================================

#[tokio::test]
async fn health_needs_no_credentials() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_credentials() {
    let app = TestApp::new();

    for uri in ["/api/sessions", "/api/user", "/api/admin/groups"] {
        let (status, body) = app.call(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["code"], "UNAUTHENTICATED");
    }
}

#[tokio::test]
async fn session_cookie_authenticates() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/user")
        .header(header::COOKIE, "theme=dark; session=c-token")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "c");
    assert_eq!(body["role"], "STUDENT");
}

#[tokio::test]
async fn current_user_reports_memberships_and_permissions() {
    let app = TestApp::new();
    app.seed_group().await;

    let (_, mentor) = app.call(Method::GET, "/api/user", Some("m"), None).await;
    assert!(mentor["mentored_group"]["group_number"].is_number());
    assert!(mentor["mentee_group"].is_null());
    let permissions: Vec<&str> = mentor["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(permissions.contains(&"session:create"));

    let (_, mentee) = app.call(Method::GET, "/api/user", Some("a"), None).await;
    assert_eq!(
        mentee["mentee_group"]["id"],
        mentor["mentored_group"]["id"]
    );
}

// =============================================================================
// Sessions and Capacity
// =============================================================================

#[tokio::test]
async fn group_scenario_enrolls_mentees_and_caps_extra_attendees() {
    let app = TestApp::new();
    app.seed_group().await;

    // Private session: mentees auto-enrolled, outsiders refused
    let s1 = app.create_session("Intro to Rust", false, 1).await;
    assert_eq!(s1["enrolled"], 2);
    assert_eq!(s1["category"], "CS_BSC_MENG");
    let s1_id = s1["id"].as_str().unwrap();

    let (status, body) = app.join(s1_id, "c").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (_, detail) = app
        .call(Method::GET, &format!("/api/sessions/{}", s1_id), Some("m"), None)
        .await;
    let attendances = detail["attendances"].as_array().unwrap();
    assert_eq!(attendances.len(), 2);
    assert!(attendances.iter().all(|a| a["status"] == "REGISTERED"));

    // Public session with one extra place
    let s2 = app.create_session("Open office hours", true, 1).await;
    let s2_id = s2["id"].as_str().unwrap();

    let (status, attendance) = app.join(s2_id, "c").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(attendance["user_id"], "c");
    assert_eq!(attendance["status"], "REGISTERED");

    let (status, body) = app.join(s2_id, "d").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");
}

#[tokio::test]
async fn mentee_added_after_creation_joins_past_full_extra_slots() {
    let app = TestApp::new();
    let group_id = app.seed_group().await;
    let session = app.create_session("Open office hours", true, 1).await;
    let id = session["id"].as_str().unwrap();
    assert_eq!(app.join(id, "c").await.0, StatusCode::CREATED);

    let (status, _) = app
        .call(
            Method::PUT,
            "/api/admin/groups",
            Some("admin"),
            Some(json!({
                "id": group_id,
                "mentor_id": "m",
                "mentee_ids": ["a", "b", "d"],
                "category": "CS_BSC_MENG"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // No backfill: the new mentee sees the session but holds no attendance
    let (_, listing) = app.call(Method::GET, "/api/sessions", Some("d"), None).await;
    let entry = listing["sessions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == id)
        .cloned()
        .unwrap();
    assert!(entry["my_attendance"].is_null());
    assert_eq!(entry["attendance_count"], 3);

    let (status, _) = app.join(id, "d").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn joining_twice_conflicts() {
    let app = TestApp::new();
    app.seed_group().await;
    let session = app.create_session("Pairing", true, 5).await;
    let id = session["id"].as_str().unwrap();

    assert_eq!(app.join(id, "c").await.0, StatusCode::CREATED);
    let (status, body) = app.join(id, "c").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    // Auto-enrolled mentees are already registered too
    assert_eq!(app.join(id, "a").await.0, StatusCode::CONFLICT);
}

#[tokio::test]
async fn students_cannot_create_sessions() {
    let app = TestApp::new();
    app.seed_group().await;

    let (status, _) = app
        .call(
            Method::POST,
            "/api/sessions",
            Some("a"),
            Some(json!({"title": "Mine", "date": "2031-03-01T17:00:00Z"})),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listing_views_follow_role() {
    let app = TestApp::new();
    app.seed_group().await;
    app.create_session("Intro to Rust", false, 0).await;

    let (status, mentor_view) = app
        .call(Method::GET, "/api/sessions?view=mentor", Some("m"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mentor_view["view"], "mentor");
    assert_eq!(mentor_view["sessions"].as_array().unwrap().len(), 1);

    let (_, student_view) = app.call(Method::GET, "/api/sessions", Some("a"), None).await;
    assert_eq!(student_view["view"], "student");
    let sessions = student_view["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["my_attendance"]["status"], "REGISTERED");

    let (_, outsider_view) = app.call(Method::GET, "/api/sessions", Some("c"), None).await;
    assert!(outsider_view["sessions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn mentor_updates_attendance_and_deletes_session() {
    let app = TestApp::new();
    app.seed_group().await;
    let session = app.create_session("Code review", false, 0).await;
    let id = session["id"].as_str().unwrap();

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/sessions/{}/attendance", id),
            Some("m"),
            Some(json!({"attendance_updates": [
                {"user_id": "a", "status": "ATTENDED"},
                {"user_id": "c", "status": "ABSENT"}
            ]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (_, detail) = app
        .call(Method::GET, &format!("/api/sessions/{}", id), Some("m"), None)
        .await;
    let statuses: Vec<(String, String)> = detail["attendances"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| {
            (
                a["user_id"].as_str().unwrap().to_string(),
                a["status"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert!(statuses.contains(&("a".to_string(), "PRESENT".to_string())));
    assert!(statuses.contains(&("c".to_string(), "ABSENT".to_string())));

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/sessions/{}", id), Some("m"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .call(Method::GET, &format!("/api/sessions/{}", id), Some("m"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_session_id_is_bad_request() {
    let app = TestApp::new();
    let (status, _) = app
        .call(Method::GET, "/api/sessions/not-a-uuid", Some("m"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Group Administration
// =============================================================================

#[tokio::test]
async fn students_and_plain_mentors_cannot_administer_groups() {
    let app = TestApp::new();

    for user in ["a", "m"] {
        let (status, body) = app
            .call(Method::GET, "/api/admin/groups", Some(user), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", user);
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn mentee_of_another_group_conflicts() {
    let app = TestApp::new();
    app.seed_group().await;

    let (_, second) = app
        .call(Method::POST, "/api/admin/groups", Some("admin"), None)
        .await;
    assert_eq!(second["group_number"], 2);

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/admin/groups",
            Some("admin"),
            Some(json!({
                "id": second["id"],
                "mentee_ids": ["c", "a"]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT, "{}", body);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn unknown_mentee_is_not_found() {
    let app = TestApp::new();
    let group_id = app.seed_group().await;

    let (status, _) = app
        .call(
            Method::PUT,
            "/api/admin/groups",
            Some("admin"),
            Some(json!({"id": group_id, "mentor_id": "m", "mentee_ids": ["ghost"]})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn group_listing_shows_mentor_and_mentees() {
    let app = TestApp::new();
    app.seed_group().await;

    let (status, groups) = app
        .call(Method::GET, "/api/admin/groups", Some("admin"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let group = &groups.as_array().unwrap()[0];
    assert_eq!(group["mentor"]["id"], "m");
    assert_eq!(group["mentees"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_group_frees_its_mentees() {
    let app = TestApp::new();
    let group_id = app.seed_group().await;

    let (status, _) = app
        .call(
            Method::DELETE,
            "/api/admin/groups",
            Some("admin"),
            Some(json!({"id": group_id})),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, mentee) = app.call(Method::GET, "/api/user", Some("a"), None).await;
    assert!(mentee["mentee_group"].is_null());
}

// =============================================================================
// Calendar Feed
// =============================================================================

#[tokio::test]
async fn calendar_token_is_stable_until_rotated() {
    let app = TestApp::new();
    app.sign_in("a").await;

    let (status, first) = app
        .call(Method::GET, "/api/user/calendar-token", Some("a"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = app
        .call(Method::GET, "/api/user/calendar-token", Some("a"), None)
        .await;
    assert_eq!(first["token"], second["token"]);

    let (status, rotated) = app
        .call(Method::POST, "/api/user/calendar-token", Some("a"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(rotated["token"], first["token"]);
}

#[tokio::test]
async fn feed_serves_registered_sessions_with_calendar_headers() {
    let app = TestApp::new();
    app.seed_group().await;
    app.create_session("Intro to Rust", false, 0).await;

    let (_, token) = app
        .call(Method::GET, "/api/user/calendar-token", Some("a"), None)
        .await;
    let token = token["token"].as_str().unwrap().to_string();

    let request = Request::builder()
        .uri(format!("/api/calendar/a?token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/calendar; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(body.contains("SUMMARY:Intro to Rust\r\n"));
}

#[tokio::test]
async fn feed_rejects_wrong_or_missing_token() {
    let app = TestApp::new();
    app.sign_in("a").await;
    app.call(Method::GET, "/api/user/calendar-token", Some("a"), None)
        .await;

    for uri in [
        "/api/calendar/a?token=not-the-token",
        "/api/calendar/a",
        "/api/calendar/nobody?token=anything",
    ] {
        let (status, _) = app.call(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
    }
}
