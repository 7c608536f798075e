//! HTTP handlers for group administration.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::command_metadata;
use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::{
    CreateGroupCommand, CreateGroupHandler, DeleteGroupCommand, DeleteGroupHandler,
    ListGroupsHandler, ListGroupsQuery, UpdateGroupCommand, UpdateGroupHandler,
};
use crate::domain::foundation::{GroupId, UserId, ValidationError};

use super::dto::{DeleteGroupRequest, GroupOverviewResponse, GroupResponse, UpdateGroupRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdminHandlers {
    list_handler: Arc<ListGroupsHandler>,
    create_handler: Arc<CreateGroupHandler>,
    update_handler: Arc<UpdateGroupHandler>,
    delete_handler: Arc<DeleteGroupHandler>,
}

impl AdminHandlers {
    pub fn new(
        list_handler: Arc<ListGroupsHandler>,
        create_handler: Arc<CreateGroupHandler>,
        update_handler: Arc<UpdateGroupHandler>,
        delete_handler: Arc<DeleteGroupHandler>,
    ) -> Self {
        Self {
            list_handler,
            create_handler,
            update_handler,
            delete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/groups - All groups with mentor and mentees
pub async fn list_groups(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListGroupsQuery { caller: user };

    match handlers.list_handler.handle(query).await {
        Ok(groups) => {
            let response: Vec<GroupOverviewResponse> = groups.iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/admin/groups - Create the next numbered group
pub async fn create_group(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let metadata = command_metadata(&user);
    let cmd = CreateGroupCommand { caller: user };

    match handlers.create_handler.handle(cmd, metadata).await {
        Ok(group) => (StatusCode::CREATED, Json(GroupResponse::from(&group))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT /api/admin/groups - Reassign mentor, category, info and mentees
pub async fn update_group(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateGroupRequest>,
) -> Response {
    let group_id = match parse_group_id(&req.id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let (mentor_id, mentee_ids) = match parse_people(req.mentor_id, req.mentee_ids) {
        Ok(people) => people,
        Err(e) => return bad_request(e.to_string()),
    };

    let metadata = command_metadata(&user);
    let cmd = UpdateGroupCommand {
        caller: user,
        group_id,
        mentor_id,
        mentee_ids,
        category: req.category,
        info: req.info,
    };

    match handlers.update_handler.handle(cmd, metadata).await {
        Ok(group) => (StatusCode::OK, Json(GroupResponse::from(&group))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// DELETE /api/admin/groups - Delete a group
pub async fn delete_group(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<DeleteGroupRequest>,
) -> Response {
    let group_id = match parse_group_id(&req.id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let metadata = command_metadata(&user);
    let cmd = DeleteGroupCommand {
        caller: user,
        group_id,
    };

    match handlers.delete_handler.handle(cmd, metadata).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn parse_group_id(raw: &str) -> Result<GroupId, Response> {
    raw.parse::<GroupId>()
        .map_err(|_| bad_request("Invalid group ID"))
}

/// A blank mentor id means "no mentor".
fn parse_people(
    mentor_id: Option<String>,
    mentee_ids: Vec<String>,
) -> Result<(Option<UserId>, Vec<UserId>), ValidationError> {
    let mentor_id = mentor_id
        .filter(|id| !id.trim().is_empty())
        .map(UserId::new)
        .transpose()?;
    let mentee_ids = mentee_ids
        .into_iter()
        .map(UserId::new)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((mentor_id, mentee_ids))
}
