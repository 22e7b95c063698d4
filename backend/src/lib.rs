//! Opal custom-app connector backed by an Authentik directory.
//!
//! Requests arrive signed by the orchestrator, are verified by
//! [`inbound::http::signature::VerifySignature`], and are served through the
//! [`domain::DirectoryService`] facade over an outbound Authentik adapter.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
