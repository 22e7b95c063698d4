//! Entities of the orchestrator contract and their mapping from directory
//! records.

use crate::domain::ports::{DirectoryGroup, DirectoryGroupMember, DirectoryUser};

/// A user visible to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Directory primary key rendered in decimal.
    pub id: String,
    /// Primary email address.
    pub email: String,
}

impl From<DirectoryUser> for User {
    fn from(user: DirectoryUser) -> Self {
        Self {
            id: user.pk.to_string(),
            email: user.email,
        }
    }
}

/// A group visible to the orchestrator.
///
/// The directory has no group descriptions, so `description` is always
/// `None` when mapped from a directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Directory primary key.
    pub id: String,
    /// Group name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

impl From<DirectoryGroup> for Group {
    fn from(group: DirectoryGroup) -> Self {
        Self {
            id: group.pk,
            name: group.name,
            description: None,
        }
    }
}

/// One user membership of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUser {
    /// Directory primary key of the user rendered in decimal.
    pub user_id: String,
    /// Primary email address.
    pub email: String,
}

impl From<DirectoryGroupMember> for GroupUser {
    fn from(member: DirectoryGroupMember) -> Self {
        Self {
            user_id: member.pk.to_string(),
            email: member.email,
        }
    }
}

/// A group nested inside another group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMemberGroup {
    /// Directory primary key of the nested group.
    pub group_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn users_are_identified_by_decimal_primary_key() {
        let user = User::from(DirectoryUser {
            pk: 42,
            username: "ada".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
        });
        assert_eq!(user.id, "42");
        assert_eq!(user.email, "ada@example.com");
    }

    #[rstest]
    fn groups_never_carry_a_description() {
        let group = Group::from(DirectoryGroup {
            pk: "9d1f0c3e-5b8a-4f5e-9a57-2c7c0f1b7a10".into(),
            name: "engineering".into(),
            parent: Some("parent".into()),
            members: Vec::new(),
        });
        assert_eq!(group.id, "9d1f0c3e-5b8a-4f5e-9a57-2c7c0f1b7a10");
        assert_eq!(group.name, "engineering");
        assert!(group.description.is_none());
    }
}
