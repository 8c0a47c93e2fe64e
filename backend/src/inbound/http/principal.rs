//! Current-principal accessor.
//!
//! [`AuthContext`] is built once per request from the session cookie and
//! handed to handlers as an extractor. It is a plain value, so services and
//! tests can construct it directly.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// How the caller of a request was identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// No credentials were presented.
    Anonymous,
    /// Credentials were presented; `principal` is `None` when they name a
    /// user that no longer exists.
    Token { principal: Option<User> },
}

/// Authentication state of the active request.
///
/// # Examples
/// ```
/// use conduit_backend::domain::User;
/// use conduit_backend::inbound::http::principal::AuthContext;
///
/// assert!(AuthContext::anonymous().current_user().is_none());
///
/// let jake = User::try_from_strings("u-1", "jake", "jake@jake.jake").unwrap();
/// let context = AuthContext::for_user(jake.clone());
/// assert_eq!(context.current_user(), Some(&jake));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    authentication: Option<Authentication>,
}

impl AuthContext {
    pub fn new(authentication: Option<Authentication>) -> Self {
        Self { authentication }
    }

    /// Context with no authentication at all.
    pub fn unauthenticated() -> Self {
        Self::new(None)
    }

    pub fn anonymous() -> Self {
        Self::new(Some(Authentication::Anonymous))
    }

    pub fn for_user(user: User) -> Self {
        Self::new(Some(Authentication::Token {
            principal: Some(user),
        }))
    }

    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    /// The authenticated user, or `None` for absent or anonymous
    /// authentication and for tokens without a principal.
    pub fn current_user(&self) -> Option<&User> {
        match self.authentication.as_ref()? {
            Authentication::Anonymous => None,
            Authentication::Token { principal } => principal.as_ref(),
        }
    }

    /// The authenticated user.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-authentication error when
    /// [`AuthContext::current_user`] is empty.
    pub fn require_user(&self) -> Result<&User, Error> {
        self.current_user().ok_or_else(Error::invalid_authentication)
    }
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let session = session.await?;
            let Some(user_id) = session.user_id()? else {
                return Ok(Self::anonymous());
            };
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;

            let principal = state.users_query.find_user(&user_id).await?;
            if principal.is_none() {
                debug!(%user_id, "session names an unknown user");
            }
            Ok(Self::new(Some(Authentication::Token { principal })))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::UserRepository;
    use crate::inbound::http::test_utils::{in_memory_state, session_cookie, test_session_middleware};
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::{fixture, rstest};

    #[fixture]
    fn jake() -> User {
        User::try_from_strings("jake-id", "jake", "jake@jake.jake").expect("fixture user")
    }

    #[rstest]
    #[case(AuthContext::unauthenticated())]
    #[case(AuthContext::anonymous())]
    #[case(AuthContext::new(Some(Authentication::Token { principal: None })))]
    fn missing_principals_read_as_empty(#[case] context: AuthContext) {
        assert!(context.current_user().is_none());
        let error = context.require_user().expect_err("no principal");
        assert_eq!(error.code(), ErrorCode::InvalidAuthentication);
    }

    #[rstest]
    fn token_principal_is_returned(jake: User) {
        let context = AuthContext::for_user(jake.clone());
        assert_eq!(context.current_user(), Some(&jake));
        assert_eq!(context.require_user().ok(), Some(&jake));
    }

    async fn whoami(context: AuthContext) -> HttpResponse {
        let name = context
            .current_user()
            .map_or_else(|| "<none>".to_owned(), |user| user.username().to_string());
        HttpResponse::Ok().body(name)
    }

    #[rstest]
    #[actix_web::test]
    async fn extractor_resolves_empty_then_set_principal(jake: User) {
        let (state, repository) = in_memory_state();
        repository.save(&jake).await.expect("seed user");
        let login_id = jake.id().clone();

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami))
                .route(
                    "/login",
                    web::post().to(move |session: SessionContext| {
                        let id = login_id.clone();
                        async move {
                            session.persist_user(&id)?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        }
                    }),
                ),
        )
        .await;

        let whoami_request = actix_test::TestRequest::get().uri("/whoami").to_request();
        let anonymous = actix_test::call_service(&app, whoami_request).await;
        assert_eq!(actix_test::read_body(anonymous).await, "<none>");

        let login_request = actix_test::TestRequest::post().uri("/login").to_request();
        let login = actix_test::call_service(&app, login_request).await;
        let cookie = session_cookie(&login);

        let authenticated = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(actix_test::read_body(authenticated).await, "jake");
    }
}
