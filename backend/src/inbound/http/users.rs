//! Users API handlers.
//!
//! ```text
//! GET /users?cursor=2
//! ```

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{CursorQuery, UsersResponse};
use crate::inbound::http::state::HttpState;

/// List one page of directory users.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use authentik_connector::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    params(CursorQuery),
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 400, description = "Malformed cursor", body = ErrorBody),
        (status = 401, description = "Missing or invalid signature", body = ErrorBody),
        (status = 500, description = "Directory unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<CursorQuery>,
) -> ApiResult<web::Json<UsersResponse>> {
    let page = state.directory.list_users(query.cursor.as_deref()).await?;
    Ok(web::Json(UsersResponse::from(page)))
}
