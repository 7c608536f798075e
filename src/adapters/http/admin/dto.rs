//! HTTP DTOs for group administration.

use serde::{Deserialize, Serialize};

use crate::adapters::http::user::UserSummaryResponse;
use crate::application::handlers::GroupOverview;
use crate::domain::group::{Category, Group};

/// Body of `PUT /admin/groups`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGroupRequest {
    pub id: String,
    #[serde(default)]
    pub mentor_id: Option<String>,
    #[serde(default)]
    pub mentee_ids: Vec<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub info: Option<String>,
}

/// Body of `DELETE /admin/groups`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteGroupRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub group_number: u32,
    pub category: Category,
    pub mentor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id().to_string(),
            group_number: group.group_number(),
            category: group.category(),
            mentor_id: group.mentor_id().map(ToString::to_string),
            info: group.info().map(str::to_string),
            created_at: group.created_at().as_datetime().to_rfc3339(),
            updated_at: group.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// A group with its people, for the admin overview.
#[derive(Debug, Clone, Serialize)]
pub struct GroupOverviewResponse {
    #[serde(flatten)]
    pub group: GroupResponse,
    pub mentor: Option<UserSummaryResponse>,
    pub mentees: Vec<UserSummaryResponse>,
}

impl From<&GroupOverview> for GroupOverviewResponse {
    fn from(overview: &GroupOverview) -> Self {
        Self {
            group: GroupResponse::from(&overview.group),
            mentor: overview.mentor.as_ref().map(Into::into),
            mentees: overview.mentees.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_defaults() {
        let json = r#"{"id": "5b0c3f7e-7f57-4a3c-9c62-1f1f2f3f4f5f"}"#;
        let req: UpdateGroupRequest = serde_json::from_str(json).unwrap();

        assert!(req.mentor_id.is_none());
        assert!(req.mentee_ids.is_empty());
        assert_eq!(req.category, Category::CsBscMeng);
    }

    #[test]
    fn update_request_reads_category() {
        let json = r#"{"id": "x", "mentor_id": "m", "mentee_ids": ["a"], "category": "CS_MATHS_MENG"}"#;
        let req: UpdateGroupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.category, Category::CsMathsMeng);
        assert_eq!(req.mentee_ids, vec!["a".to_string()]);
    }
}
