//! Driven port for the backing directory's REST API.
//!
//! The port speaks the directory's native vocabulary: numeric user keys,
//! UUID group keys and one-based page numbers with a reported window. Every
//! call receives the [`AuthContext`] explicitly; adapters hold no per-request
//! state.

use async_trait::async_trait;
use pagination::{PageNumber, PageWindow};

use super::define_port_error;
use crate::domain::Secret;

/// Header pair presented to an access proxy in front of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeProxyCredentials {
    /// Value sent as `CF-Access-Client-Id`.
    pub client_id: String,
    /// Value sent as `CF-Access-Client-Secret`.
    pub client_secret: Secret,
}

/// Credentials attached to every outbound directory call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Bearer token for the directory API.
    pub token: Secret,
    /// Optional access-proxy headers.
    pub edge_proxy: Option<EdgeProxyCredentials>,
}

/// A user account as listed by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Numeric primary key.
    pub pk: i64,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Primary email address; may be empty.
    pub email: String,
}

/// A user embedded in a group fetched with members included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroupMember {
    /// Numeric primary key of the user.
    pub pk: i64,
    /// Login name.
    pub username: String,
    /// Primary email address; may be empty.
    pub email: String,
}

/// A group as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    /// UUID primary key.
    pub pk: String,
    /// Group name.
    pub name: String,
    /// Primary key of the parent group, if any.
    pub parent: Option<String>,
    /// Members; only populated when requested.
    pub members: Vec<DirectoryGroupMember>,
}

/// One object referencing a group, from the directory's "used by" listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUsage {
    /// Lowercase model name, e.g. `group` or `policybinding`.
    pub model_name: String,
    /// Primary key of the referencing object.
    pub pk: String,
    /// Display name of the referencing object.
    pub name: String,
}

impl DirectoryUsage {
    /// Whether the referencing object is a group.
    pub fn is_group(&self) -> bool {
        self.model_name == "group"
    }
}

/// One page of a directory list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPage<T> {
    /// Records on this page.
    pub results: Vec<T>,
    /// Position reported by the directory.
    pub window: PageWindow,
}

define_port_error! {
    /// Errors surfaced while calling the directory.
    pub enum DirectoryApiError {
        /// The directory answered with a non-success status.
        Status { status: u16, message: String } =>
            "directory responded with {status}: {message}",
        /// No response was received.
        Transport { message: String } =>
            "directory transport failed: {message}",
        /// A response arrived but could not be decoded.
        Decode { message: String } =>
            "directory response decode failed: {message}",
    }
}

impl DirectoryApiError {
    /// HTTP status of the directory response, when one was received.
    pub fn response_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Port for the directory's user and group endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch one page of users.
    async fn list_users(
        &self,
        auth: &AuthContext,
        page: PageNumber,
        page_size: u32,
    ) -> Result<DirectoryPage<DirectoryUser>, DirectoryApiError>;

    /// Fetch one page of groups, without members.
    async fn list_groups(
        &self,
        auth: &AuthContext,
        page: PageNumber,
        page_size: u32,
    ) -> Result<DirectoryPage<DirectoryGroup>, DirectoryApiError>;

    /// Fetch a single group, optionally embedding its members.
    async fn retrieve_group(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        include_users: bool,
    ) -> Result<DirectoryGroup, DirectoryApiError>;

    /// List objects that reference the group.
    async fn group_used_by(
        &self,
        auth: &AuthContext,
        group_pk: &str,
    ) -> Result<Vec<DirectoryUsage>, DirectoryApiError>;

    /// Add a user to a group.
    async fn add_user(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        user_pk: i64,
    ) -> Result<(), DirectoryApiError>;

    /// Remove a user from a group.
    async fn remove_user(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        user_pk: i64,
    ) -> Result<(), DirectoryApiError>;

    /// Set or clear a group's parent.
    async fn set_parent(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        parent: Option<String>,
    ) -> Result<(), DirectoryApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::status(DirectoryApiError::status(404_u16, "Not found."), Some(404))]
    #[case::transport(DirectoryApiError::transport("connection refused"), None)]
    #[case::decode(DirectoryApiError::decode("expected value"), None)]
    fn only_responses_carry_a_status(#[case] error: DirectoryApiError, #[case] status: Option<u16>) {
        assert_eq!(error.response_status(), status);
    }

    #[rstest]
    #[case("group", true)]
    #[case("policybinding", false)]
    fn usage_detects_groups(#[case] model_name: &str, #[case] expected: bool) {
        let usage = DirectoryUsage {
            model_name: model_name.to_owned(),
            pk: "pk".to_owned(),
            name: "name".to_owned(),
        };
        assert_eq!(usage.is_group(), expected);
    }
}
