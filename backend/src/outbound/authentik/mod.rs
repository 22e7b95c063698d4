//! Authentik outbound adapter.
//!
//! A thin reqwest implementation of the `DirectoryApi` port against the
//! Authentik core API (`/api/v3/core/...`).

mod dto;
mod http_api;

pub use http_api::{AuthentikHttpApi, EDGE_CLIENT_ID_HEADER, EDGE_CLIENT_SECRET_HEADER};
