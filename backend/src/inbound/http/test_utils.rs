//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::Secret;
use crate::domain::directory::{DirectoryService, DirectorySettings, Scheme};
use crate::domain::ports::MockDirectoryApi;
use crate::inbound::http::state::HttpState;

/// Directory settings pointing at a host that is never contacted.
pub fn test_settings() -> DirectorySettings {
    DirectorySettings {
        token: Secret::new("ak-token"),
        host: "auth.example.test".to_owned(),
        scheme: Scheme::Https,
        edge_proxy: None,
    }
}

/// Wrap a configured mock in handler state.
pub fn state_with(api: MockDirectoryApi) -> web::Data<HttpState> {
    let directory =
        DirectoryService::new(test_settings(), Arc::new(api)).expect("test settings are valid");
    web::Data::new(HttpState::new(directory))
}
