//! Session identity: the opaque token that partitions the ledger by client.
//!
//! A session is not an authentication mechanism. Possession of the token is
//! the only thing that ties a client to its transactions.

mod cookie;
mod middleware;

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use cookie::{
    COOKIE_SESSION_ID, DEFAULT_SESSION_DURATION, get_session_id_from_cookies, set_session_cookie,
};
pub use middleware::{SessionState, session_guard};

/// The opaque key that identifies a client's partition of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Parse a session ID from a raw token.
    ///
    /// Returns `None` if `token` is empty or only whitespace, otherwise the
    /// token is kept exactly as given.
    pub fn parse(token: &str) -> Option<Self> {
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token.to_owned()))
        }
    }

    /// Create a new, random session ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a session ID without checking that it is well-formed.
    #[cfg(test)]
    pub fn new_unchecked(token: &str) -> Self {
        Self(token.to_owned())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToSql for SessionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for SessionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Self)
    }
}

/// The result of [ensure]: a usable session ID and whether it was just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsuredSession {
    /// The client already had a valid session.
    Existing(SessionId),
    /// The client had no session, so a new one was minted.
    ///
    /// The caller is responsible for sending it back to the client, otherwise
    /// the client's next request will start yet another partition.
    Minted(SessionId),
}

impl EnsuredSession {
    /// The session ID, regardless of where it came from.
    pub fn session_id(&self) -> &SessionId {
        match self {
            EnsuredSession::Existing(session_id) | EnsuredSession::Minted(session_id) => {
                session_id
            }
        }
    }

    /// Whether the session was minted by this call.
    pub fn is_minted(&self) -> bool {
        matches!(self, EnsuredSession::Minted(_))
    }
}

/// Reuse `existing_token` if it is well-formed, otherwise mint a new session.
///
/// Two concurrent calls from a client without a session will mint two
/// different sessions. Nothing reconciles them.
pub fn ensure(existing_token: Option<&str>) -> EnsuredSession {
    match existing_token.and_then(SessionId::parse) {
        Some(session_id) => EnsuredSession::Existing(session_id),
        None => {
            let session_id = SessionId::generate();
            tracing::debug!("Minted new session {session_id}");
            EnsuredSession::Minted(session_id)
        }
    }
}
