//! Reqwest-backed Authentik adapter.
//!
//! This adapter owns transport details only: endpoint construction,
//! credential headers, HTTP error mapping and JSON decoding into directory
//! records.

use async_trait::async_trait;
use pagination::PageNumber;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    GroupDto, PaginatedDto, PatchedGroupParentDto, UsedByDto, UserAccountRequestDto, UserDto,
};
use crate::domain::ports::{
    AuthContext, DirectoryApi, DirectoryApiError, DirectoryGroup, DirectoryPage, DirectoryUsage,
    DirectoryUser,
};

/// Access-proxy client id header.
pub const EDGE_CLIENT_ID_HEADER: &str = "CF-Access-Client-Id";
/// Access-proxy client secret header.
pub const EDGE_CLIENT_SECRET_HEADER: &str = "CF-Access-Client-Secret";

/// Authentik adapter issuing requests below one API root.
pub struct AuthentikHttpApi {
    client: Client,
    base_url: Url,
}

impl AuthentikHttpApi {
    /// Build an adapter rooted at `base_url`, e.g.
    /// `https://auth.example.com/api/v3/`.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DirectoryApiError::transport(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn group_endpoint(&self, group_pk: &str, action: Option<&str>) -> Result<Url, DirectoryApiError> {
        match action {
            Some(action) => self.endpoint(&["core", "groups", group_pk, action]),
            None => self.endpoint(&["core", "groups", group_pk]),
        }
    }
}

fn authorise(builder: RequestBuilder, auth: &AuthContext) -> RequestBuilder {
    let builder = builder
        .bearer_auth(auth.token.expose())
        .header(ACCEPT, "application/json");
    match &auth.edge_proxy {
        Some(proxy) => builder
            .header(EDGE_CLIENT_ID_HEADER, proxy.client_id.as_str())
            .header(EDGE_CLIENT_SECRET_HEADER, proxy.client_secret.expose()),
        None => builder,
    }
}

async fn execute(builder: RequestBuilder) -> Result<Vec<u8>, DirectoryApiError> {
    let response = builder.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DirectoryApiError> {
    serde_json::from_slice(body).map_err(|error| {
        DirectoryApiError::decode(format!("invalid Authentik JSON payload: {error}"))
    })
}

#[async_trait]
impl DirectoryApi for AuthentikHttpApi {
    async fn list_users(
        &self,
        auth: &AuthContext,
        page: PageNumber,
        page_size: u32,
    ) -> Result<DirectoryPage<DirectoryUser>, DirectoryApiError> {
        let url = self.endpoint(&["core", "users"])?;
        let request = self
            .client
            .get(url)
            .query(&[("page", page.get()), ("page_size", page_size)]);
        let body = execute(authorise(request, auth)).await?;
        let listed: PaginatedDto<UserDto> = decode(&body)?;
        debug!(page = page.get(), total_pages = listed.pagination.total_pages, "fetched users page");
        Ok(listed.into_page(DirectoryUser::from))
    }

    async fn list_groups(
        &self,
        auth: &AuthContext,
        page: PageNumber,
        page_size: u32,
    ) -> Result<DirectoryPage<DirectoryGroup>, DirectoryApiError> {
        let url = self.endpoint(&["core", "groups"])?;
        let request = self.client.get(url).query(&[
            ("page", page.get().to_string()),
            ("page_size", page_size.to_string()),
            ("include_users", "false".to_owned()),
        ]);
        let body = execute(authorise(request, auth)).await?;
        let listed: PaginatedDto<GroupDto> = decode(&body)?;
        debug!(page = page.get(), total_pages = listed.pagination.total_pages, "fetched groups page");
        Ok(listed.into_page(DirectoryGroup::from))
    }

    async fn retrieve_group(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        include_users: bool,
    ) -> Result<DirectoryGroup, DirectoryApiError> {
        let url = self.group_endpoint(group_pk, None)?;
        let request = self
            .client
            .get(url)
            .query(&[("include_users", include_users)]);
        let body = execute(authorise(request, auth)).await?;
        decode::<GroupDto>(&body).map(DirectoryGroup::from)
    }

    async fn group_used_by(
        &self,
        auth: &AuthContext,
        group_pk: &str,
    ) -> Result<Vec<DirectoryUsage>, DirectoryApiError> {
        let url = self.group_endpoint(group_pk, Some("used_by"))?;
        let body = execute(authorise(self.client.get(url), auth)).await?;
        let usages: Vec<UsedByDto> = decode(&body)?;
        Ok(usages.into_iter().map(DirectoryUsage::from).collect())
    }

    async fn add_user(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        user_pk: i64,
    ) -> Result<(), DirectoryApiError> {
        let url = self.group_endpoint(group_pk, Some("add_user"))?;
        let request = self
            .client
            .post(url)
            .json(&UserAccountRequestDto { pk: user_pk });
        execute(authorise(request, auth)).await.map(drop)
    }

    async fn remove_user(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        user_pk: i64,
    ) -> Result<(), DirectoryApiError> {
        let url = self.group_endpoint(group_pk, Some("remove_user"))?;
        let request = self
            .client
            .post(url)
            .json(&UserAccountRequestDto { pk: user_pk });
        execute(authorise(request, auth)).await.map(drop)
    }

    async fn set_parent(
        &self,
        auth: &AuthContext,
        group_pk: &str,
        parent: Option<String>,
    ) -> Result<(), DirectoryApiError> {
        let url = self.group_endpoint(group_pk, None)?;
        let request = self.client.patch(url).json(&PatchedGroupParentDto {
            parent: parent.as_deref(),
        });
        execute(authorise(request, auth)).await.map(drop)
    }
}

fn map_transport_error(error: reqwest::Error) -> DirectoryApiError {
    DirectoryApiError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectoryApiError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        body_preview
    };
    DirectoryApiError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_api_tests.rs"]
mod tests;
