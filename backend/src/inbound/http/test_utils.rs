//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::state::HttpState;
use crate::domain::ports::InMemoryCafeRepository;
use crate::domain::{AdminGate, CafeDirectoryService, NewCafe};

/// Admin key configured by [`http_state_with`].
pub const ADMIN_KEY: &str = "letmein";

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

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock pinned to mid-2026.
pub fn fixture_clock() -> Arc<dyn Clock> {
    let utc_now = Utc
        .with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    Arc::new(FixtureClock { utc_now })
}

/// HTTP state over an in-memory store seeded with `cafes`.
pub fn http_state_with(cafes: impl IntoIterator<Item = NewCafe>) -> HttpState {
    let repo = Arc::new(InMemoryCafeRepository::with_cafes(cafes));
    let service = Arc::new(CafeDirectoryService::new(repo));
    HttpState::new(
        service.clone(),
        service,
        AdminGate::new(ADMIN_KEY).expect("valid admin key"),
        fixture_clock(),
    )
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}
