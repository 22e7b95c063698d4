//! Request and response bodies of the orchestrator contract.
//!
//! Field names are snake_case on the wire. Every list response carries a
//! `next_cursor`; the empty string means there are no further pages.

use pagination::{Cursor, Page};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::directory::{Group, GroupMemberGroup, GroupUser, User};

/// Query parameters accepted by paginated list routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CursorQuery {
    /// Cursor returned by the previous page; absent or empty for the first.
    pub cursor: Option<String>,
}

/// An empty JSON object, returned by mutations and the status route.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EmptyResponse {}

/// A directory user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserBody {
    /// Directory primary key rendered in decimal.
    #[schema(example = "42")]
    pub id: String,
    /// Primary email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// One page of users.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    /// Users on this page.
    pub users: Vec<UserBody>,
    /// Cursor for the next page.
    #[schema(value_type = String)]
    pub next_cursor: Cursor,
}

impl From<Page<User>> for UsersResponse {
    fn from(page: Page<User>) -> Self {
        let (users, next_cursor) = page.map(UserBody::from).into_parts();
        Self { users, next_cursor }
    }
}

/// A directory group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupBody {
    /// Directory primary key.
    #[schema(example = "9d1f0c3e-5b8a-4f5e-9a57-2c7c0f1b7a10")]
    pub id: String,
    /// Group name.
    #[schema(example = "engineering")]
    pub name: String,
    /// Free-text description; never provided by this directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Group> for GroupBody {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            description: group.description,
        }
    }
}

/// One page of groups.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupsResponse {
    /// Groups on this page.
    pub groups: Vec<GroupBody>,
    /// Cursor for the next page.
    #[schema(value_type = String)]
    pub next_cursor: Cursor,
}

impl From<Page<Group>> for GroupsResponse {
    fn from(page: Page<Group>) -> Self {
        let (groups, next_cursor) = page.map(GroupBody::from).into_parts();
        Self {
            groups,
            next_cursor,
        }
    }
}

/// A single group.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupResponse {
    /// The requested group.
    pub group: GroupBody,
}

/// A user's membership of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupUserBody {
    /// Directory primary key of the user.
    #[schema(example = "42")]
    pub user_id: String,
    /// Primary email address.
    pub email: String,
}

impl From<GroupUser> for GroupUserBody {
    fn from(member: GroupUser) -> Self {
        Self {
            user_id: member.user_id,
            email: member.email,
        }
    }
}

/// Users of a group. The list is always complete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupUsersResponse {
    /// Group members.
    pub users: Vec<GroupUserBody>,
    /// Always empty.
    #[schema(value_type = String)]
    pub next_cursor: Cursor,
}

/// Body of `POST /groups/{group_id}/users`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddGroupUserRequest {
    /// Directory primary key of the user, in decimal.
    #[schema(example = "42")]
    pub user_id: String,
}

/// A group nested in another group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupMemberGroupBody {
    /// Directory primary key of the nested group.
    pub group_id: String,
}

impl From<GroupMemberGroup> for GroupMemberGroupBody {
    fn from(member: GroupMemberGroup) -> Self {
        Self {
            group_id: member.group_id,
        }
    }
}

/// Groups nested in a group. The list is always complete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupMemberGroupsResponse {
    /// Nested groups.
    pub groups: Vec<GroupMemberGroupBody>,
    /// Always empty.
    #[schema(value_type = String)]
    pub next_cursor: Cursor,
}

/// Body of `POST /groups/{group_id}/member-groups`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddGroupMemberGroupRequest {
    /// Directory primary key of the group to nest.
    pub member_group_id: String,
}

/// A resource granted to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupResourceBody {
    /// Resource identifier.
    pub resource_id: String,
    /// Access level on the resource, when the app models them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level_remote_id: Option<String>,
}

/// Resources granted to a group.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupResourcesResponse {
    /// Granted resources.
    pub resources: Vec<GroupResourceBody>,
    /// Always empty.
    #[schema(value_type = String)]
    pub next_cursor: Cursor,
}

/// Body of `POST /groups/{group_id}/resources`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddGroupResourceRequest {
    /// Resource identifier.
    pub resource_id: String,
    /// Access level on the resource.
    #[serde(default)]
    pub access_level_remote_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagination::PageWindow;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn users_page_serialises_with_next_cursor() {
        let page = Page::from_window(
            vec![User {
                id: "42".to_owned(),
                email: "ada@example.com".to_owned(),
            }],
            PageWindow::new(1, 2),
        );
        let value = serde_json::to_value(UsersResponse::from(page)).expect("encode");
        assert_eq!(
            value,
            json!({"users": [{"id": "42", "email": "ada@example.com"}], "next_cursor": "2"})
        );
    }

    #[rstest]
    fn groups_omit_absent_description() {
        let body = GroupBody::from(Group {
            id: "g".to_owned(),
            name: "ops".to_owned(),
            description: None,
        });
        assert_eq!(
            serde_json::to_value(body).expect("encode"),
            json!({"id": "g", "name": "ops"})
        );
    }

    #[rstest]
    fn empty_response_is_an_empty_object() {
        assert_eq!(
            serde_json::to_value(EmptyResponse {}).expect("encode"),
            json!({})
        );
    }
}
