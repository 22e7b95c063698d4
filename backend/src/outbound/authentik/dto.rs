//! DTOs for the Authentik core API.
//!
//! Responses decode into these transport shapes first and are then mapped
//! into the directory records the port exposes.

use pagination::PageWindow;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    DirectoryGroup, DirectoryGroupMember, DirectoryPage, DirectoryUsage, DirectoryUser,
};

#[derive(Debug, Deserialize)]
pub(super) struct PaginationDto {
    pub(super) current: u32,
    pub(super) total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct PaginatedDto<T> {
    pub(super) pagination: PaginationDto,
    #[serde(default = "Vec::new")]
    pub(super) results: Vec<T>,
}

impl<T> PaginatedDto<T> {
    pub(super) fn into_page<U>(self, map: impl FnMut(T) -> U) -> DirectoryPage<U> {
        DirectoryPage {
            results: self.results.into_iter().map(map).collect(),
            window: PageWindow::new(self.pagination.current, self.pagination.total_pages),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) pk: i64,
    pub(super) username: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) email: String,
}

impl From<UserDto> for DirectoryUser {
    fn from(dto: UserDto) -> Self {
        Self {
            pk: dto.pk,
            username: dto.username,
            name: dto.name,
            email: dto.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GroupMemberDto {
    pub(super) pk: i64,
    pub(super) username: String,
    #[serde(default)]
    pub(super) email: String,
}

impl From<GroupMemberDto> for DirectoryGroupMember {
    fn from(dto: GroupMemberDto) -> Self {
        Self {
            pk: dto.pk,
            username: dto.username,
            email: dto.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GroupDto {
    pub(super) pk: String,
    pub(super) name: String,
    #[serde(default)]
    pub(super) parent: Option<String>,
    /// Present only when members were requested.
    #[serde(default)]
    pub(super) users_obj: Option<Vec<GroupMemberDto>>,
}

impl From<GroupDto> for DirectoryGroup {
    fn from(dto: GroupDto) -> Self {
        Self {
            pk: dto.pk,
            name: dto.name,
            parent: dto.parent,
            members: dto
                .users_obj
                .unwrap_or_default()
                .into_iter()
                .map(DirectoryGroupMember::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UsedByDto {
    pub(super) model_name: String,
    pub(super) pk: String,
    #[serde(default)]
    pub(super) name: String,
}

impl From<UsedByDto> for DirectoryUsage {
    fn from(dto: UsedByDto) -> Self {
        Self {
            model_name: dto.model_name,
            pk: dto.pk,
            name: dto.name,
        }
    }
}

/// Body of `add_user` and `remove_user`.
#[derive(Debug, Serialize)]
pub(super) struct UserAccountRequestDto {
    pub(super) pk: i64,
}

/// Body of a partial group update touching only the parent.
#[derive(Debug, Serialize)]
pub(super) struct PatchedGroupParentDto<'a> {
    /// Serialised as `null` when clearing.
    pub(super) parent: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn paginated_users_decode_with_window() {
        let body = json!({
            "pagination": {
                "next": 3, "previous": 1, "count": 250, "current": 2,
                "total_pages": 3, "start_index": 101, "end_index": 200
            },
            "results": [
                {"pk": 7, "username": "ada", "name": "Ada", "email": "ada@example.com", "is_active": true}
            ]
        });
        let dto: PaginatedDto<UserDto> = serde_json::from_value(body).expect("decode");
        let page = dto.into_page(DirectoryUser::from);
        assert_eq!(page.window, PageWindow::new(2, 3));
        assert_eq!(page.results[0].pk, 7);
        assert_eq!(page.results[0].email, "ada@example.com");
    }

    #[rstest]
    fn group_without_users_obj_has_no_members() {
        let body = json!({
            "pk": "9d1f0c3e-5b8a-4f5e-9a57-2c7c0f1b7a10",
            "num_pk": 12,
            "name": "engineering",
            "parent": null,
            "users": [1, 2]
        });
        let group = DirectoryGroup::from(serde_json::from_value::<GroupDto>(body).expect("decode"));
        assert!(group.members.is_empty());
        assert!(group.parent.is_none());
    }

    #[rstest]
    fn clearing_parent_serialises_null() {
        let body = serde_json::to_value(PatchedGroupParentDto { parent: None }).expect("encode");
        assert_eq!(body, json!({"parent": null}));
    }
}
