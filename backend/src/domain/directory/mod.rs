//! Directory client facade.
//!
//! [`DirectoryService`] is the only thing handlers talk to. It owns the
//! immutable [`DirectorySettings`], derives an [`AuthContext`] for each
//! operation, converts orchestrator cursors to directory page numbers and
//! back, and funnels every directory failure through [`errors::translate`].

pub mod errors;
mod model;
mod settings;

use std::sync::Arc;

use pagination::{Cursor, PAGE_SIZE, Page};
use tracing::debug;

pub use self::errors::Operation;
pub use self::model::{Group, GroupMemberGroup, GroupUser, User};
pub use self::settings::{DirectorySettings, Scheme, SchemeParseError};
use crate::domain::Error;
use crate::domain::ports::{AuthContext, DirectoryApi};
use self::errors::translate;

/// Facade over a [`DirectoryApi`] speaking the orchestrator's vocabulary.
#[derive(Clone)]
pub struct DirectoryService {
    settings: DirectorySettings,
    api: Arc<dyn DirectoryApi>,
}

impl DirectoryService {
    /// Bind settings to a directory adapter.
    ///
    /// # Errors
    /// Returns a configuration error when the token is blank or when
    /// access-proxy credentials are only partly filled in.
    pub fn new(settings: DirectorySettings, api: Arc<dyn DirectoryApi>) -> Result<Self, Error> {
        if settings.token.is_blank() {
            return Err(Error::configuration("Unable to find Authentik token"));
        }
        if let Some(proxy) = &settings.edge_proxy {
            if proxy.client_id.trim().is_empty() || proxy.client_secret.is_blank() {
                return Err(Error::configuration(
                    "Cloudflare Access credentials are not set",
                ));
            }
        }
        Ok(Self { settings, api })
    }

    fn auth_context(&self) -> AuthContext {
        self.settings.auth_context()
    }

    /// List one page of users.
    ///
    /// # Errors
    /// Returns a validation error for a malformed cursor, or the translated
    /// directory failure.
    pub async fn list_users(&self, cursor: Option<&str>) -> Result<Page<User>, Error> {
        let page = page_from_cursor(cursor)?;
        let auth = self.auth_context();
        let listed = self
            .api
            .list_users(&auth, page, PAGE_SIZE)
            .await
            .map_err(|err| translate(Operation::ListUsers, err))?;
        debug!(page = page.get(), count = listed.results.len(), "listed users");
        let users = listed.results.into_iter().map(User::from).collect();
        Ok(Page::from_window(users, listed.window))
    }

    /// List one page of groups.
    ///
    /// # Errors
    /// Returns a validation error for a malformed cursor, or the translated
    /// directory failure.
    pub async fn list_groups(&self, cursor: Option<&str>) -> Result<Page<Group>, Error> {
        let page = page_from_cursor(cursor)?;
        let auth = self.auth_context();
        let listed = self
            .api
            .list_groups(&auth, page, PAGE_SIZE)
            .await
            .map_err(|err| translate(Operation::ListGroups, err))?;
        debug!(page = page.get(), count = listed.results.len(), "listed groups");
        let groups = listed.results.into_iter().map(Group::from).collect();
        Ok(Page::from_window(groups, listed.window))
    }

    /// Fetch one group.
    ///
    /// # Errors
    /// Returns the translated directory failure.
    pub async fn get_group(&self, group_id: &str) -> Result<Group, Error> {
        let auth = self.auth_context();
        self.api
            .retrieve_group(&auth, group_id, false)
            .await
            .map(Group::from)
            .map_err(|err| translate(Operation::GetGroup, err))
    }

    /// List the users of a group.
    ///
    /// The directory embeds members in the group record, so the result is
    /// always complete.
    ///
    /// # Errors
    /// Returns the translated directory failure.
    pub async fn list_group_members(&self, group_id: &str) -> Result<Vec<GroupUser>, Error> {
        let auth = self.auth_context();
        let group = self
            .api
            .retrieve_group(&auth, group_id, true)
            .await
            .map_err(|err| translate(Operation::GetGroupUsers, err))?;
        Ok(group.members.into_iter().map(GroupUser::from).collect())
    }

    /// List groups nested in a group.
    ///
    /// Nested groups reference their parent, so they show up in the parent's
    /// "used by" listing. Each one is fetched to confirm it still resolves.
    ///
    /// # Errors
    /// Returns the translated directory failure of the first call that fails.
    pub async fn list_member_groups(
        &self,
        group_id: &str,
    ) -> Result<Vec<GroupMemberGroup>, Error> {
        let auth = self.auth_context();
        let usages = self
            .api
            .group_used_by(&auth, group_id)
            .await
            .map_err(|err| translate(Operation::GetMemberGroups, err))?;

        let mut member_groups = Vec::new();
        for usage in usages.into_iter().filter(|usage| usage.is_group()) {
            let child = self
                .api
                .retrieve_group(&auth, &usage.pk, false)
                .await
                .map_err(|err| translate(Operation::GetGroup, err))?;
            member_groups.push(GroupMemberGroup { group_id: child.pk });
        }
        Ok(member_groups)
    }

    /// Add a user to a group.
    ///
    /// # Errors
    /// Returns a validation error, without calling the directory, when the
    /// user id is not numeric; otherwise the translated directory failure.
    pub async fn add_user_to_group(&self, group_id: &str, user_id: &str) -> Result<(), Error> {
        let user_pk = parse_user_pk(user_id)?;
        let auth = self.auth_context();
        self.api
            .add_user(&auth, group_id, user_pk)
            .await
            .map_err(|err| translate(Operation::AddUserToGroup, err))
    }

    /// Remove a user from a group.
    ///
    /// # Errors
    /// Returns a validation error, without calling the directory, when the
    /// user id is not numeric; otherwise the translated directory failure.
    pub async fn remove_user_from_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<(), Error> {
        let user_pk = parse_user_pk(user_id)?;
        let auth = self.auth_context();
        self.api
            .remove_user(&auth, group_id, user_pk)
            .await
            .map_err(|err| translate(Operation::RemoveUserFromGroup, err))
    }

    /// Nest `member_group_id` inside `containing_group_id` by setting its
    /// parent.
    ///
    /// # Errors
    /// Returns the translated directory failure.
    pub async fn add_group_to_group(
        &self,
        containing_group_id: &str,
        member_group_id: &str,
    ) -> Result<(), Error> {
        let auth = self.auth_context();
        self.api
            .set_parent(&auth, member_group_id, Some(containing_group_id.to_owned()))
            .await
            .map_err(|err| translate(Operation::AddGroupToGroup, err))
    }

    /// Un-nest a group by clearing its parent.
    ///
    /// # Errors
    /// Returns the translated directory failure.
    pub async fn remove_group_from_group(&self, member_group_id: &str) -> Result<(), Error> {
        let auth = self.auth_context();
        self.api
            .set_parent(&auth, member_group_id, None)
            .await
            .map_err(|err| translate(Operation::RemoveGroupFromGroup, err))
    }
}

fn page_from_cursor(cursor: Option<&str>) -> Result<pagination::PageNumber, Error> {
    Cursor::page_from_query(cursor)
        .map_err(|err| Error::validation(format!("invalid cursor: {err}")))
}

fn parse_user_pk(user_id: &str) -> Result<i64, Error> {
    user_id.parse::<i64>().map_err(|err| {
        Error::validation(format!(
            "user_id `{user_id}` is not a numeric Authentik user id"
        ))
        .with_cause(err)
    })
}

#[cfg(test)]
mod tests;
