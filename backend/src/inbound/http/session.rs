//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie carries one value: the CSRF token bound to the
//! visitor's browser. The add-cafe form embeds it and the submit handler
//! checks it before anything is validated or stored.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::domain::Error;

pub(crate) const CSRF_TOKEN_KEY: &str = "csrf_token";

/// Form-level message shown when the CSRF check fails.
pub const CSRF_EXPIRED_MESSAGE: &str = "The form has expired. Please submit it again.";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// The session's CSRF token, minting and storing one on first use.
    pub fn csrf_token(&self) -> Result<String, Error> {
        if let Some(token) = self.stored_token()? {
            return Ok(token);
        }
        let token = Uuid::new_v4().simple().to_string();
        self.0
            .insert(CSRF_TOKEN_KEY, &token)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(token)
    }

    /// `true` when `submitted` matches the token stored in the session.
    ///
    /// A session without a token never verifies.
    pub fn verify_csrf(&self, submitted: Option<&str>) -> Result<bool, Error> {
        let stored = self.stored_token()?;
        Ok(matches!((stored, submitted), (Some(stored), Some(submitted)) if stored == submitted))
    }

    fn stored_token(&self) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(CSRF_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Submitted {
        token: Option<String>,
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/token",
                web::get().to(|session: SessionContext| async move {
                    let token = session.csrf_token()?;
                    Ok::<_, Error>(HttpResponse::Ok().body(token))
                }),
            )
            .route(
                "/verify",
                web::get().to(
                    |session: SessionContext, query: web::Query<Submitted>| async move {
                        let ok = session.verify_csrf(query.token.as_deref())?;
                        Ok::<_, Error>(HttpResponse::Ok().body(ok.to_string()))
                    },
                ),
            )
    }

    async fn body_string(res: actix_web::dev::ServiceResponse) -> String {
        let body = test::read_body(res).await;
        String::from_utf8(body.to_vec()).expect("utf-8 body")
    }

    #[actix_web::test]
    async fn token_round_trips_through_cookie() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/token").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();
        let token = body_string(res).await;

        let again = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/token")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(body_string(again).await, token);

        let verified = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/verify?token={token}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(body_string(verified).await, "true");
    }

    #[actix_web::test]
    async fn wrong_token_fails_verification() {
        let app = test::init_service(session_test_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/token").to_request()).await;
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let verified = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/verify?token=forged")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(body_string(verified).await, "false");
    }

    #[actix_web::test]
    async fn missing_session_never_verifies() {
        let app = test::init_service(session_test_app()).await;

        let verified = test::call_service(
            &app,
            test::TestRequest::get().uri("/verify?token=anything").to_request(),
        )
        .await;

        assert_eq!(body_string(verified).await, "false");
    }
}
