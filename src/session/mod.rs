pub(crate) mod guard;

pub use guard::{session_middleware, AuthGate, MaybeUser, SessionContext, SessionUser};

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::config::AppConfig;

pub const SESSION_COOKIE: &str = "__session";

const SESSION_DAYS: i64 = 7;
const REMEMBER_DAYS: i64 = 30;

/// Contents of the signed session cookie. User id and token are always
/// written together; a request is authenticated iff both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user_id: String,
    pub token: String,
}

pub fn read_session(jar: &SignedCookieJar) -> Option<SessionData> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

pub fn session_cookie(config: &AppConfig, data: &SessionData, remember: bool) -> Cookie<'static> {
    let days = if remember { REMEMBER_DAYS } else { SESSION_DAYS };
    let value = serde_json::to_string(data).unwrap_or_default();
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.is_production())
        .max_age(Duration::days(days))
        .build()
}

/// Cookie used to clear the session; name and path must match the one
/// set at login for the browser to drop it.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}
