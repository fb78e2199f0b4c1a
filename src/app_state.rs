//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    Error,
    db::initialize,
    session::DEFAULT_SESSION_DURATION,
    transaction::{LedgerStore, SQLiteLedgerStore, TransactionService},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<L>
where
    L: LedgerStore + Clone + Send + Sync,
{
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// How long newly issued session cookies are valid for.
    pub session_duration: Duration,

    /// The service that records and reads transactions.
    pub service: TransactionService<L>,
}

impl<L> AppState<L>
where
    L: LedgerStore + Clone + Send + Sync,
{
    /// Create a new [AppState] around the ledger `store`.
    pub fn with_store(cookie_secret: &str, store: L) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            session_duration: DEFAULT_SESSION_DURATION,
            service: TransactionService::new(store),
        }
    }
}

impl AppState<SQLiteLedgerStore> {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, cookie_secret: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self::with_store(
            cookie_secret,
            SQLiteLedgerStore::new(connection),
        ))
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl<L> FromRef<AppState<L>> for Key
where
    L: LedgerStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<L>) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
