//! Groups API handlers.
//!
//! ```text
//! GET    /groups?cursor=2
//! GET    /groups/{group_id}
//! GET    /groups/{group_id}/users
//! POST   /groups/{group_id}/users {"user_id":"42"}
//! DELETE /groups/{group_id}/users/{user_id}
//! GET    /groups/{group_id}/member-groups
//! POST   /groups/{group_id}/member-groups {"member_group_id":"..."}
//! DELETE /groups/{group_id}/member-groups/{member_group_id}
//! GET    /groups/{group_id}/resources
//! POST   /groups/{group_id}/resources
//! DELETE /groups/{group_id}/resources/{resource_id}
//! ```
//!
//! Member and resource lists are complete in one response, so their
//! `next_cursor` is always empty.

use actix_web::{delete, get, post, web};
use pagination::Cursor;
use tracing::debug;

use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{
    AddGroupMemberGroupRequest, AddGroupResourceRequest, AddGroupUserRequest, CursorQuery,
    EmptyResponse, GroupBody, GroupMemberGroupBody, GroupMemberGroupsResponse, GroupResponse,
    GroupResourcesResponse, GroupUserBody, GroupUsersResponse, GroupsResponse,
};
use crate::inbound::http::state::HttpState;

/// List one page of directory groups.
#[utoipa::path(
    get,
    path = "/groups",
    params(CursorQuery),
    responses(
        (status = 200, description = "Groups", body = GroupsResponse),
        (status = 400, description = "Malformed cursor", body = ErrorBody),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 500, description = "Directory unavailable", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "listGroups"
)]
#[get("/groups")]
pub async fn list_groups(
    state: web::Data<HttpState>,
    query: web::Query<CursorQuery>,
) -> ApiResult<web::Json<GroupsResponse>> {
    let page = state.directory.list_groups(query.cursor.as_deref()).await?;
    Ok(web::Json(GroupsResponse::from(page)))
}

/// Fetch one group.
#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    params(("group_id" = String, Path, description = "Directory group key")),
    responses(
        (status = 200, description = "Group", body = GroupResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "getGroup"
)]
#[get("/groups/{group_id}")]
pub async fn get_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupResponse>> {
    let group = state.directory.get_group(&path).await?;
    Ok(web::Json(GroupResponse {
        group: GroupBody::from(group),
    }))
}

/// List the users of a group.
#[utoipa::path(
    get,
    path = "/groups/{group_id}/users",
    params(("group_id" = String, Path, description = "Directory group key")),
    responses(
        (status = 200, description = "Group users", body = GroupUsersResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "getGroupUsers"
)]
#[get("/groups/{group_id}/users")]
pub async fn list_group_users(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupUsersResponse>> {
    let members = state.directory.list_group_members(&path).await?;
    Ok(web::Json(GroupUsersResponse {
        users: members.into_iter().map(GroupUserBody::from).collect(),
        next_cursor: Cursor::end(),
    }))
}

/// Add a user to a group.
#[utoipa::path(
    post,
    path = "/groups/{group_id}/users",
    params(("group_id" = String, Path, description = "Directory group key")),
    request_body = AddGroupUserRequest,
    responses(
        (status = 200, description = "User added", body = EmptyResponse),
        (status = 400, description = "Non-numeric user id", body = ErrorBody),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 404, description = "Unknown group or user", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "addGroupUser"
)]
#[post("/groups/{group_id}/users")]
pub async fn add_group_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddGroupUserRequest>,
) -> ApiResult<web::Json<EmptyResponse>> {
    state
        .directory
        .add_user_to_group(&path, &payload.user_id)
        .await?;
    Ok(web::Json(EmptyResponse {}))
}

/// Remove a user from a group.
#[utoipa::path(
    delete,
    path = "/groups/{group_id}/users/{user_id}",
    params(
        ("group_id" = String, Path, description = "Directory group key"),
        ("user_id" = String, Path, description = "Directory user key, in decimal")
    ),
    responses(
        (status = 200, description = "User removed", body = EmptyResponse),
        (status = 400, description = "Non-numeric user id", body = ErrorBody),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 404, description = "Unknown group or user", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "removeGroupUser"
)]
#[delete("/groups/{group_id}/users/{user_id}")]
pub async fn remove_group_user(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<EmptyResponse>> {
    let (group_id, user_id) = path.into_inner();
    state
        .directory
        .remove_user_from_group(&group_id, &user_id)
        .await?;
    Ok(web::Json(EmptyResponse {}))
}

/// List groups nested in a group.
#[utoipa::path(
    get,
    path = "/groups/{group_id}/member-groups",
    params(("group_id" = String, Path, description = "Directory group key")),
    responses(
        (status = 200, description = "Nested groups", body = GroupMemberGroupsResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "getGroupMemberGroups"
)]
#[get("/groups/{group_id}/member-groups")]
pub async fn list_group_member_groups(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupMemberGroupsResponse>> {
    let groups = state.directory.list_member_groups(&path).await?;
    Ok(web::Json(GroupMemberGroupsResponse {
        groups: groups.into_iter().map(GroupMemberGroupBody::from).collect(),
        next_cursor: Cursor::end(),
    }))
}

/// Nest a group inside another.
#[utoipa::path(
    post,
    path = "/groups/{group_id}/member-groups",
    params(("group_id" = String, Path, description = "Containing group key")),
    request_body = AddGroupMemberGroupRequest,
    responses(
        (status = 200, description = "Group nested", body = EmptyResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "addGroupMemberGroup"
)]
#[post("/groups/{group_id}/member-groups")]
pub async fn add_group_member_group(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AddGroupMemberGroupRequest>,
) -> ApiResult<web::Json<EmptyResponse>> {
    state
        .directory
        .add_group_to_group(&path, &payload.member_group_id)
        .await?;
    Ok(web::Json(EmptyResponse {}))
}

/// Un-nest a group.
///
/// The directory tracks a single parent per group, so the containing group
/// in the path is not consulted.
#[utoipa::path(
    delete,
    path = "/groups/{group_id}/member-groups/{member_group_id}",
    params(
        ("group_id" = String, Path, description = "Containing group key"),
        ("member_group_id" = String, Path, description = "Nested group key")
    ),
    responses(
        (status = 200, description = "Group un-nested", body = EmptyResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "removeGroupMemberGroup"
)]
#[delete("/groups/{group_id}/member-groups/{member_group_id}")]
pub async fn remove_group_member_group(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<EmptyResponse>> {
    let (group_id, member_group_id) = path.into_inner();
    debug!(%group_id, %member_group_id, "removing nested group");
    state
        .directory
        .remove_group_from_group(&member_group_id)
        .await?;
    Ok(web::Json(EmptyResponse {}))
}

/// List resources granted to a group. The directory models none.
#[utoipa::path(
    get,
    path = "/groups/{group_id}/resources",
    params(("group_id" = String, Path, description = "Directory group key")),
    responses(
        (status = 200, description = "Always empty", body = GroupResourcesResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "getGroupResources"
)]
#[get("/groups/{group_id}/resources")]
pub async fn list_group_resources(
    path: web::Path<String>,
) -> web::Json<GroupResourcesResponse> {
    debug!(group_id = %path, "group resources are not modelled");
    web::Json(GroupResourcesResponse {
        resources: Vec::new(),
        next_cursor: Cursor::end(),
    })
}

/// Accept a resource grant without side effects.
#[utoipa::path(
    post,
    path = "/groups/{group_id}/resources",
    params(("group_id" = String, Path, description = "Directory group key")),
    request_body = AddGroupResourceRequest,
    responses(
        (status = 200, description = "Accepted", body = EmptyResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "addGroupResource"
)]
#[post("/groups/{group_id}/resources")]
pub async fn add_group_resource(
    path: web::Path<String>,
    payload: web::Json<AddGroupResourceRequest>,
) -> web::Json<EmptyResponse> {
    debug!(
        group_id = %path,
        resource_id = %payload.resource_id,
        "ignoring group resource grant"
    );
    web::Json(EmptyResponse {})
}

/// Accept a resource revocation without side effects.
#[utoipa::path(
    delete,
    path = "/groups/{group_id}/resources/{resource_id}",
    params(
        ("group_id" = String, Path, description = "Directory group key"),
        ("resource_id" = String, Path, description = "Resource identifier")
    ),
    responses(
        (status = 200, description = "Accepted", body = EmptyResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody)
    ),
    tags = ["groups"],
    operation_id = "removeGroupResource"
)]
#[delete("/groups/{group_id}/resources/{resource_id}")]
pub async fn remove_group_resource(path: web::Path<(String, String)>) -> web::Json<EmptyResponse> {
    let (group_id, resource_id) = path.into_inner();
    debug!(%group_id, %resource_id, "ignoring group resource revocation");
    web::Json(EmptyResponse {})
}

#[cfg(test)]
#[path = "groups_tests.rs"]
mod tests;
