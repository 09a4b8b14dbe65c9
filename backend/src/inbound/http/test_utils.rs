//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::DefaultClock;

use crate::domain::identity_events::DEFAULT_TOLERANCE_SECS;
use crate::domain::ports::{
    FixtureCollectionsCommand, FixtureCollectionsQuery, FixtureIdentitySyncCommand,
    FixturePhotoSearchQuery,
};
use crate::domain::{UserId, WebhookSecret, WebhookVerifier};

use super::session::remember_user;
use super::state::{HttpState, HttpStatePorts};

/// Signing secret shared by handler tests (the published svix test secret).
pub const TEST_WEBHOOK_SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

/// Route mounted by [`sign_in_route`] to mint session cookies in tests.
pub const SIGN_IN_PATH: &str = "/__test/sign-in/{user_id}";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

async fn sign_in(
    path: web::Path<String>,
    session: actix_session::Session,
) -> Result<HttpResponse, crate::domain::Error> {
    let id = UserId::new(path.into_inner())
        .map_err(|err| crate::domain::Error::invalid_request(err.to_string()))?;
    remember_user(&session, &id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Route standing in for the identity provider's front door.
pub fn sign_in_route() -> actix_web::Route {
    web::get().to(sign_in)
}

/// Sign `user_id` in through the test route and return the session cookie.
pub async fn session_cookie_for<S, B>(app: &S, user_id: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/__test/sign-in/{user_id}"))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "test sign-in failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Ports backed by fixtures; tests override the one under test.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        identity_sync: Arc::new(FixtureIdentitySyncCommand),
        collections: Arc::new(FixtureCollectionsCommand),
        collections_query: Arc::new(FixtureCollectionsQuery),
        photos: Arc::new(FixturePhotoSearchQuery),
    }
}

/// Verifier for [`TEST_WEBHOOK_SECRET`] checking against the wall clock.
pub fn test_verifier() -> WebhookVerifier {
    let secret = match WebhookSecret::parse(TEST_WEBHOOK_SECRET) {
        Ok(secret) => secret,
        Err(err) => panic!("test secret must parse: {err}"),
    };
    WebhookVerifier::new(
        secret,
        TimeDelta::seconds(DEFAULT_TOLERANCE_SECS),
        Arc::new(DefaultClock),
    )
}

/// State wired from `ports` and [`test_verifier`].
pub fn test_state(ports: HttpStatePorts) -> HttpState {
    HttpState::new(ports, test_verifier())
}
