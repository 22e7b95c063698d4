//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the connector contract. It registers:
//!
//! - **Paths**: every route served by the inbound HTTP layer
//! - **Schemas**: request and response bodies plus [`ErrorBody`]
//! - **Security**: the two signature headers every request must carry
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{
    AddGroupMemberGroupRequest, AddGroupResourceRequest, AddGroupUserRequest, EmptyResponse,
    GroupBody, GroupMemberGroupBody, GroupMemberGroupsResponse, GroupResourceBody,
    GroupResourcesResponse, GroupResponse, GroupUserBody, GroupUsersResponse, GroupsResponse,
    UserBody, UsersResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the request signature scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "OpalSignature",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                SIGNATURE_HEADER,
                "Hex HMAC-SHA256 of `v0:{timestamp}:{body}` under the shared signing secret.",
            ))),
        );
        components.add_security_scheme(
            "OpalTimestamp",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                TIMESTAMP_HEADER,
                "Request timestamp folded into the signature.",
            ))),
        );
    }
}

/// OpenAPI document for the connector.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Authentik connector API",
        description = "Opal custom-app connector managing Authentik users, groups and memberships."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("OpalSignature" = [], "OpalTimestamp" = [])),
    paths(
        crate::inbound::http::status::get_status,
        crate::inbound::http::users::list_users,
        crate::inbound::http::groups::list_groups,
        crate::inbound::http::groups::get_group,
        crate::inbound::http::groups::list_group_users,
        crate::inbound::http::groups::add_group_user,
        crate::inbound::http::groups::remove_group_user,
        crate::inbound::http::groups::list_group_member_groups,
        crate::inbound::http::groups::add_group_member_group,
        crate::inbound::http::groups::remove_group_member_group,
        crate::inbound::http::groups::list_group_resources,
        crate::inbound::http::groups::add_group_resource,
        crate::inbound::http::groups::remove_group_resource,
        crate::inbound::http::resources::list_resources,
        crate::inbound::http::resources::get_resource,
        crate::inbound::http::resources::list_resource_access_levels,
        crate::inbound::http::resources::list_resource_users,
        crate::inbound::http::resources::add_resource_user,
        crate::inbound::http::resources::remove_resource_user,
    ),
    components(schemas(
        ErrorBody,
        EmptyResponse,
        UserBody,
        UsersResponse,
        GroupBody,
        GroupsResponse,
        GroupResponse,
        GroupUserBody,
        GroupUsersResponse,
        AddGroupUserRequest,
        GroupMemberGroupBody,
        GroupMemberGroupsResponse,
        AddGroupMemberGroupRequest,
        GroupResourceBody,
        GroupResourcesResponse,
        AddGroupResourceRequest,
    )),
    tags(
        (name = "status", description = "Connector readiness"),
        (name = "users", description = "Directory users"),
        (name = "groups", description = "Directory groups, memberships and nesting"),
        (name = "resources", description = "Resources, which this directory does not model")
    )
)]
pub struct ApiDoc;
