//! Reading and writing the session cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::Duration;

use super::SessionId;

/// The name of the cookie that carries the session ID.
pub const COOKIE_SESSION_ID: &str = "sessionId";
/// How long a client keeps its session cookie after it was issued.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::days(7);

/// Add the session cookie to the cookie jar.
///
/// The cookie is valid for the whole site and expires after `duration`, after
/// which the client starts over with a new, empty session.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    session_id: &SessionId,
    duration: Duration,
) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION_ID, session_id.to_string()))
            .path("/")
            .max_age(duration)
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Get the session ID from the cookie jar.
///
/// Returns `None` if the cookie is missing, could not be decrypted, or holds a
/// blank value.
pub fn get_session_id_from_cookies(jar: &PrivateCookieJar) -> Option<SessionId> {
    jar.get(COOKIE_SESSION_ID)
        .and_then(|cookie| SessionId::parse(cookie.value_trimmed()))
}
