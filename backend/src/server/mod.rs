//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use authentik_connector::Trace;
#[cfg(debug_assertions)]
use authentik_connector::doc::ApiDoc;
use authentik_connector::domain::Secret;
use authentik_connector::inbound::http::configure;
use authentik_connector::inbound::http::signature::VerifySignature;
use authentik_connector::inbound::http::state::HttpState;
use authentik_connector::inbound::http::status::HealthState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Every connector route sits behind [`VerifySignature`]; [`Trace`] wraps it
/// so rejected requests still carry a trace id. Swagger UI is mounted outside
/// the signed scope in debug builds.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        signing_secret,
        directory,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let http_state = web::Data::new(HttpState::new(directory));

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let connector = web::scope("")
            .wrap(VerifySignature::new(Secret::clone(&signing_secret)))
            .configure(configure);

        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        let app = app.service(connector);

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
