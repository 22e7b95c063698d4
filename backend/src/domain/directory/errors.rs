//! Translation of directory failures into connector errors.
//!
//! This is the only place a [`DirectoryApiError`] becomes an [`Error`].

use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::DirectoryApiError;

/// Status used when the directory never produced a usable response.
const UNREACHABLE_STATUS: u16 = 500;

/// Directory operations, used as the caller-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing users.
    ListUsers,
    /// Listing groups.
    ListGroups,
    /// Fetching one group.
    GetGroup,
    /// Fetching the members of a group.
    GetGroupUsers,
    /// Discovering groups nested in a group.
    GetMemberGroups,
    /// Adding a user to a group.
    AddUserToGroup,
    /// Removing a user from a group.
    RemoveUserFromGroup,
    /// Nesting a group inside another.
    AddGroupToGroup,
    /// Un-nesting a group.
    RemoveGroupFromGroup,
}

impl Operation {
    /// Human-readable failure message for the operation.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::ListUsers => "failed to list users from Authentik",
            Self::ListGroups => "failed to list groups from Authentik",
            Self::GetGroup => "failed to get group from Authentik",
            Self::GetGroupUsers => "failed to get users for group from Authentik",
            Self::GetMemberGroups => "failed to get member groups for group from Authentik",
            Self::AddUserToGroup => "failed to add user to group in Authentik",
            Self::RemoveUserFromGroup => "failed to remove user from group in Authentik",
            Self::AddGroupToGroup => "failed to add member group to containing group in Authentik",
            Self::RemoveGroupFromGroup => {
                "failed to remove member group from containing group in Authentik"
            }
        }
    }
}

/// Convert a directory failure into the error handlers return.
///
/// A received status is reused verbatim; a failure without a usable response
/// becomes 500. The directory failure is kept as the diagnostic cause.
pub fn translate(operation: Operation, failure: DirectoryApiError) -> Error {
    let status = failure.response_status().unwrap_or(UNREACHABLE_STATUS);
    warn!(
        ?operation,
        status,
        error = %failure,
        "directory call failed"
    );
    Error::downstream(status, operation.failure_message()).with_cause(failure)
}
