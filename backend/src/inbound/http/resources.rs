//! Resource routes.
//!
//! The directory has no notion of connector-managed resources, so every
//! route answers 501 in the shared error shape. They stay registered so the
//! orchestrator sees a definite answer rather than a 404.

use actix_web::{HttpRequest, HttpResponse, delete, get, post};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;

fn unsupported(req: &HttpRequest) -> Error {
    Error::not_implemented(format!(
        "{} {} is not supported by the Authentik connector",
        req.method(),
        req.path()
    ))
}

/// List resources.
#[utoipa::path(
    get,
    path = "/resources",
    responses(
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 501, description = "Not supported", body = ErrorBody)
    ),
    tags = ["resources"],
    operation_id = "listResources"
)]
#[get("/resources")]
pub async fn list_resources(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(unsupported(&req))
}

/// Fetch a resource.
#[utoipa::path(
    get,
    path = "/resources/{resource_id}",
    params(("resource_id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 501, description = "Not supported", body = ErrorBody)
    ),
    tags = ["resources"],
    operation_id = "getResource"
)]
#[get("/resources/{resource_id}")]
pub async fn get_resource(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(unsupported(&req))
}

/// List access levels of a resource.
#[utoipa::path(
    get,
    path = "/resources/{resource_id}/access_levels",
    params(("resource_id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 501, description = "Not supported", body = ErrorBody)
    ),
    tags = ["resources"],
    operation_id = "getResourceAccessLevels"
)]
#[get("/resources/{resource_id}/access_levels")]
pub async fn list_resource_access_levels(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(unsupported(&req))
}

/// List users of a resource.
#[utoipa::path(
    get,
    path = "/resources/{resource_id}/users",
    params(("resource_id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 501, description = "Not supported", body = ErrorBody)
    ),
    tags = ["resources"],
    operation_id = "getResourceUsers"
)]
#[get("/resources/{resource_id}/users")]
pub async fn list_resource_users(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(unsupported(&req))
}

/// Grant a user access to a resource.
#[utoipa::path(
    post,
    path = "/resources/{resource_id}/users",
    params(("resource_id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 501, description = "Not supported", body = ErrorBody)
    ),
    tags = ["resources"],
    operation_id = "addResourceUser"
)]
#[post("/resources/{resource_id}/users")]
pub async fn add_resource_user(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(unsupported(&req))
}

/// Revoke a user's access to a resource.
#[utoipa::path(
    delete,
    path = "/resources/{resource_id}/users/{user_id}",
    params(
        ("resource_id" = String, Path, description = "Resource identifier"),
        ("user_id" = String, Path, description = "Directory user key")
    ),
    responses(
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 501, description = "Not supported", body = ErrorBody)
    ),
    tags = ["resources"],
    operation_id = "removeResourceUser"
)]
#[delete("/resources/{resource_id}/users/{user_id}")]
pub async fn remove_resource_user(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(unsupported(&req))
}
