//! Profile and follow handlers.
//!
//! ```text
//! GET    /api/profiles/{username}
//! POST   /api/profiles/{username}/follow
//! DELETE /api/profiles/{username}/follow
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::ProfileData;
use crate::domain::{Error, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::principal::AuthContext;
use crate::inbound::http::state::HttpState;

/// `{"profile": ...}` response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEnvelope {
    pub profile: ProfileData,
}

/// A blank path segment cannot name any user.
fn parse_username(raw: String) -> Result<Username, Error> {
    Username::new(raw).map_err(|_| Error::not_found("profile not found"))
}

/// Profile of `username`; anonymous callers see `following: false`.
#[get("/profiles/{username}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileEnvelope>> {
    let username = parse_username(path.into_inner())?;
    let profile = state
        .users_query
        .profile(auth.current_user(), &username)
        .await?;
    Ok(web::Json(ProfileEnvelope { profile }))
}

#[post("/profiles/{username}/follow")]
pub async fn follow_user(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileEnvelope>> {
    let follower = auth.require_user()?;
    let username = parse_username(path.into_inner())?;
    let profile = state.users_command.follow(follower, &username).await?;
    Ok(web::Json(ProfileEnvelope { profile }))
}

#[delete("/profiles/{username}/follow")]
pub async fn unfollow_user(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileEnvelope>> {
    let follower = auth.require_user()?;
    let username = parse_username(path.into_inner())?;
    let profile = state.users_command.unfollow(follower, &username).await?;
    Ok(web::Json(ProfileEnvelope { profile }))
}
