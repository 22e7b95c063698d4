//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use authentik_connector::domain::{DirectoryService, Secret};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) signing_secret: Secret,
    pub(crate) directory: DirectoryService,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration around a ready directory facade.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, signing_secret: Secret, directory: DirectoryService) -> Self {
        Self {
            bind_addr,
            signing_secret,
            directory,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
