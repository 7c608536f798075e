//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::user::UserSummaryResponse;
use crate::application::handlers::{
    AttendeeEntry, SessionListing, SessionWithAttendees, StudentSessionEntry,
};
use crate::domain::attendance::{AttendanceStatus, AttendanceUpdate, SessionAttendance};
use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::group::{Category, Group};
use crate::domain::session::{MentoringSession, SessionDetails};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /sessions` and `PUT /sessions/:id`.
///
/// There is no category field; sessions always take their group's.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub max_capacity: Option<u32>,
}

impl From<SessionRequest> for SessionDetails {
    fn from(req: SessionRequest) -> Self {
        SessionDetails {
            title: req.title,
            description: req.description,
            date: Timestamp::from_datetime(req.date),
            start_time: req.start_time.map(Timestamp::from_datetime),
            end_time: req.end_time.map(Timestamp::from_datetime),
            location: req.location,
            is_public: req.is_public,
            max_capacity: req.max_capacity,
        }
    }
}

/// One `{user_id, status}` pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceUpdateItem {
    pub user_id: String,
    pub status: AttendanceStatus,
}

/// Body of `PUT /sessions/:id/attendance`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub attendance_updates: Vec<AttendanceUpdateItem>,
}

impl UpdateAttendanceRequest {
    pub fn into_updates(self) -> Result<Vec<AttendanceUpdate>, ValidationError> {
        self.attendance_updates
            .into_iter()
            .map(|item| {
                Ok(AttendanceUpdate {
                    user_id: UserId::new(item.user_id)?,
                    status: item.status,
                })
            })
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub location: String,
    pub is_public: bool,
    pub category: Category,
    pub max_capacity: Option<u32>,
    pub mentor_id: String,
    pub group_id: String,
    pub created_at: String,
    pub updated_at: String,
}

fn rfc3339(ts: &Timestamp) -> String {
    ts.as_datetime().to_rfc3339()
}

impl From<&MentoringSession> for SessionResponse {
    fn from(session: &MentoringSession) -> Self {
        Self {
            id: session.id().to_string(),
            title: session.title().to_string(),
            description: session.description().map(str::to_string),
            date: rfc3339(session.date()),
            start_time: session.start_time().map(rfc3339),
            end_time: session.end_time().map(rfc3339),
            location: session.location().to_string(),
            is_public: session.is_public(),
            category: session.category(),
            max_capacity: session.max_capacity(),
            mentor_id: session.mentor_id().to_string(),
            group_id: session.group_id().to_string(),
            created_at: rfc3339(session.created_at()),
            updated_at: rfc3339(session.updated_at()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceResponse {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub status: AttendanceStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&SessionAttendance> for AttendanceResponse {
    fn from(attendance: &SessionAttendance) -> Self {
        Self {
            id: attendance.id().to_string(),
            session_id: attendance.session_id().to_string(),
            user_id: attendance.user_id().to_string(),
            status: attendance.status(),
            created_at: rfc3339(attendance.created_at()),
            updated_at: rfc3339(attendance.updated_at()),
        }
    }
}

/// An attendance with the attendee's public fields.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeeResponse {
    #[serde(flatten)]
    pub attendance: AttendanceResponse,
    pub user: Option<UserSummaryResponse>,
}

impl From<&AttendeeEntry> for AttendeeResponse {
    fn from(entry: &AttendeeEntry) -> Self {
        Self {
            attendance: AttendanceResponse::from(&entry.attendance),
            user: entry.user.as_ref().map(Into::into),
        }
    }
}

/// Session with all attendances.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub group_number: Option<u32>,
    pub attendances: Vec<AttendeeResponse>,
}

impl From<&SessionWithAttendees> for SessionDetailResponse {
    fn from(view: &SessionWithAttendees) -> Self {
        Self {
            session: SessionResponse::from(&view.session),
            group_number: view.group.as_ref().map(Group::group_number),
            attendances: view.attendees.iter().map(Into::into).collect(),
        }
    }
}

/// Session as a prospective attendee sees it.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSessionResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub group_number: Option<u32>,
    pub mentor: Option<UserSummaryResponse>,
    pub my_attendance: Option<AttendanceResponse>,
    pub attendance_count: u32,
}

impl From<&StudentSessionEntry> for StudentSessionResponse {
    fn from(entry: &StudentSessionEntry) -> Self {
        Self {
            session: SessionResponse::from(&entry.session),
            group_number: entry.group.as_ref().map(Group::group_number),
            mentor: entry.mentor.as_ref().map(Into::into),
            my_attendance: entry.my_attendance.as_ref().map(Into::into),
            attendance_count: entry.attendance_count,
        }
    }
}

/// Response for `GET /sessions`; `view` says which listing was produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", content = "sessions", rename_all = "lowercase")]
pub enum SessionListResponse {
    Mentor(Vec<SessionDetailResponse>),
    Student(Vec<StudentSessionResponse>),
}

impl From<&SessionListing> for SessionListResponse {
    fn from(listing: &SessionListing) -> Self {
        match listing {
            SessionListing::Mentor(items) => {
                SessionListResponse::Mentor(items.iter().map(Into::into).collect())
            }
            SessionListing::Student(items) => {
                SessionListResponse::Student(items.iter().map(Into::into).collect())
            }
        }
    }
}

/// Response for `POST /sessions`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    /// Mentees auto-enrolled at creation
    pub enrolled: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_request_defaults_optional_fields() {
        let json = r#"{"title": "Office hours", "date": "2030-05-01T18:00:00Z"}"#;
        let req: SessionRequest = serde_json::from_str(json).unwrap();

        assert!(!req.is_public);
        assert!(req.max_capacity.is_none());
        assert_eq!(req.location, "");

        let details = SessionDetails::from(req);
        assert_eq!(details.title, "Office hours");
        assert!(details.start_time.is_none());
    }

    #[test]
    fn attendance_update_accepts_attended_alias() {
        let json = r#"{"attendance_updates": [
            {"user_id": "a", "status": "ATTENDED"},
            {"user_id": "b", "status": "CANCELLED"}
        ]}"#;
        let req: UpdateAttendanceRequest = serde_json::from_str(json).unwrap();
        let updates = req.into_updates().unwrap();

        assert_eq!(updates[0].status, AttendanceStatus::Present);
        assert_eq!(updates[1].user_id.as_str(), "b");
    }

    #[test]
    fn attendance_update_rejects_unknown_status() {
        let json = r#"{"attendance_updates": [{"user_id": "a", "status": "LATE"}]}"#;
        assert!(serde_json::from_str::<UpdateAttendanceRequest>(json).is_err());
    }

    #[test]
    fn attendance_update_rejects_blank_user() {
        let req = UpdateAttendanceRequest {
            attendance_updates: vec![AttendanceUpdateItem {
                user_id: " ".to_string(),
                status: AttendanceStatus::Absent,
            }],
        };
        assert!(req.into_updates().is_err());
    }

    #[test]
    fn listing_is_tagged_with_its_view() {
        let json = serde_json::to_value(SessionListResponse::Student(vec![])).unwrap();
        assert_eq!(json["view"], "student");
        assert!(json["sessions"].as_array().unwrap().is_empty());
    }
}
