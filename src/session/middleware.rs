//! Middleware that requires a session cookie and hands the session ID to route handlers.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::Duration;

use crate::{AppState, Error, session::get_session_id_from_cookies, transaction::LedgerStore};

/// The state needed for reading and issuing session cookies.
#[derive(Clone)]
pub struct SessionState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How long newly issued session cookies are valid for.
    pub session_duration: Duration,
}

impl<L> FromRef<AppState<L>> for SessionState
where
    L: LedgerStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<L>) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            session_duration: state.session_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<SessionState> for Key {
    fn from_ref(state: &SessionState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that checks for a session cookie.
///
/// The session ID is placed into the request extensions and the request is
/// executed normally if the cookie is present, otherwise a 401 response is
/// returned and the request never reaches the route handler.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(session_id): Extension<SessionId>` to receive the session ID.
pub async fn session_guard(
    State(state): State<SessionState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::<Key>::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}.");
            return Error::Unauthorized.into_response();
        }
    };

    let Some(session_id) = get_session_id_from_cookies(&jar) else {
        tracing::debug!("Rejecting request to {} without a session", parts.uri);
        return Error::Unauthorized.into_response();
    };

    parts.extensions.insert(session_id);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}
