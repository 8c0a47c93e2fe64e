//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod principal;
pub mod profiles;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` handler on `cfg`.
///
/// Also installs [`validation::json_config`] so malformed bodies render as
/// 422 envelopes. Callers mount the result under `/api` behind the session
/// middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(users::register)
        .service(users::current_user)
        .service(users::update_current_user)
        .service(profiles::get_profile)
        .service(profiles::follow_user)
        .service(profiles::unfollow_user);
}
