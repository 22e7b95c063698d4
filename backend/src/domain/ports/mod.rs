//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod directory_api;

#[cfg(test)]
pub use directory_api::MockDirectoryApi;
pub use directory_api::{
    AuthContext, DirectoryApi, DirectoryApiError, DirectoryGroup, DirectoryGroupMember,
    DirectoryPage, DirectoryUsage, DirectoryUser, EdgeProxyCredentials,
};
