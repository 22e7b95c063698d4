//! Status endpoint polled by the orchestrator.
//!
//! The route sits behind the signature middleware like every other route; it
//! reports readiness only and never calls the directory.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

use super::schemas::EmptyResponse;

/// Readiness flag flipped once the listener is bound.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a new health state starting as not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Report connector status. Return 200 once the server is ready and 503
/// before that.
#[utoipa::path(
    get,
    path = "/status",
    tags = ["status"],
    responses(
        (status = 200, description = "Connector is ready", body = EmptyResponse),
        (status = 401, description = "Missing or invalid signature", body = crate::inbound::http::error::ErrorBody),
        (status = 503, description = "Connector is starting")
    ),
    operation_id = "getStatus"
)]
#[get("/status")]
pub async fn get_status(state: web::Data<HealthState>) -> HttpResponse {
    let mut response = if state.is_ready() {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(EmptyResponse {})
}
