//! User account handlers.
//!
//! ```text
//! POST /api/users {"user":{"username":"jake","email":"jake@jake.jake"}}
//! GET  /api/user
//! PUT  /api/user  {"user":{"bio":"I like to skateboard"}}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ports::{RegisterUserRequest, UpdateUserCommand, UserData};
use crate::domain::{Email, Error, UserChanges, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::principal::AuthContext;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{email_address, not_blank, rejected_value, validate_body};

/// `{"user": ...}` wrapper used by every request and response in this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

/// Registration body.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RegisterUserBody {
    /// Missing keys deserialise as blank so they are reported on the field.
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
}

const REGISTER_USER_BODY: &str = "RegisterUserBody";

impl RegisterUserBody {
    fn into_request(self) -> Result<RegisterUserRequest, Error> {
        let reject = |err| rejected_value(REGISTER_USER_BODY, &err);
        Ok(RegisterUserRequest {
            username: Username::new(self.username).map_err(reject)?,
            email: Email::new(self.email).map_err(reject)?,
            bio: self.bio,
            image: self.image,
        })
    }
}

/// Profile update body; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateUserBody {
    #[validate(custom(function = "email_address"))]
    pub email: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub username: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

const UPDATE_USER_BODY: &str = "UpdateUserBody";

impl UpdateUserBody {
    fn into_changes(self) -> Result<UserChanges, Error> {
        let reject = |err| rejected_value(UPDATE_USER_BODY, &err);
        Ok(UserChanges {
            email: self.email.map(Email::new).transpose().map_err(reject)?,
            username: self.username.map(Username::new).transpose().map_err(reject)?,
            bio: self.bio,
            image: self.image,
        })
    }
}

/// Register an account and sign the caller in.
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UserEnvelope<RegisterUserBody>>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner().user;
    validate_body(&body, REGISTER_USER_BODY)?;

    let user = state.users_command.register(body.into_request()?).await?;
    session.persist_user(user.id())?;

    Ok(HttpResponse::Created().json(UserEnvelope {
        user: UserData::from(&user),
    }))
}

/// Account view of the caller.
#[get("/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<UserEnvelope<UserData>>> {
    let principal = auth.require_user()?;
    let user = state
        .users_query
        .find_user_data(principal.id())
        .await?
        .ok_or_else(Error::invalid_authentication)?;
    Ok(web::Json(UserEnvelope { user }))
}

/// Update the caller's profile.
#[put("/user")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<UserEnvelope<UpdateUserBody>>,
) -> ApiResult<web::Json<UserEnvelope<UserData>>> {
    let principal = auth.require_user()?;
    let body = payload.into_inner().user;
    validate_body(&body, UPDATE_USER_BODY)?;

    let command = UpdateUserCommand::new(principal.clone(), body.into_changes()?);
    let user = state.users_command.update_user(command).await?;
    Ok(web::Json(UserEnvelope {
        user: UserData::from(&user),
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
