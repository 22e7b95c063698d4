//! Connector entry-point: loads settings, wires the Authentik adapter and
//! serves the signed orchestrator API.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use authentik_connector::config::settings_from_env;
use authentik_connector::domain::DirectoryService;
use authentik_connector::inbound::http::status::HealthState;
use authentik_connector::outbound::authentik::AuthentikHttpApi;
use server::{ServerConfig, create_server};

/// Build Prometheus middleware, logging and discarding failures.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "metrics disabled: Prometheus initialisation failed");
            None
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    let base_url = settings.directory.api_base_url().map_err(|e| {
        std::io::Error::other(format!("invalid Authentik API root: {e}"))
    })?;
    let api = AuthentikHttpApi::new(base_url.clone())
        .map_err(|e| std::io::Error::other(format!("failed to build HTTP client: {e}")))?;
    let directory = DirectoryService::new(settings.directory, Arc::new(api))
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!(bind_addr = %settings.bind_addr, directory = %base_url, "starting connector");

    let config = ServerConfig::new(settings.bind_addr, settings.signing_secret, directory);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("authentik_connector")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
