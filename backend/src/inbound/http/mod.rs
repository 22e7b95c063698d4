//! HTTP inbound adapter exposing the orchestrator's connector contract.

pub mod error;
pub mod groups;
pub mod resources;
pub mod schemas;
pub mod signature;
pub mod state;
pub mod status;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every connector route together with the extractor error
/// handlers.
///
/// Callers supply [`state::HttpState`] and [`status::HealthState`] as app
/// data and wrap the app with [`signature::VerifySignature`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use authentik_connector::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    error::extractor_config(cfg);
    cfg.service(status::get_status)
        .service(users::list_users)
        .service(groups::list_groups)
        .service(groups::get_group)
        .service(groups::list_group_users)
        .service(groups::add_group_user)
        .service(groups::remove_group_user)
        .service(groups::list_group_member_groups)
        .service(groups::add_group_member_group)
        .service(groups::remove_group_member_group)
        .service(groups::list_group_resources)
        .service(groups::add_group_resource)
        .service(groups::remove_group_resource)
        .service(resources::list_resources)
        .service(resources::get_resource)
        .service(resources::list_resource_access_levels)
        .service(resources::list_resource_users)
        .service(resources::add_resource_user)
        .service(resources::remove_resource_user);
}
