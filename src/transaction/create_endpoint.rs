//! Defines the endpoint for creating a new transaction.
use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    session::{self, COOKIE_SESSION_ID, SessionState, set_session_cookie},
    transaction::{
        LedgerStore, Magnitude, TransactionId, TransactionService, TransactionTitle,
        TransactionType,
    },
};

/// The state needed to create or read transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<L> {
    /// The service that records and reads transactions.
    pub service: TransactionService<L>,
}

impl<L> FromRef<AppState<L>> for TransactionState<L>
where
    L: LedgerStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<L>) -> Self {
        Self {
            service: state.service.clone(),
        }
    }
}

/// The JSON body for creating a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionForm {
    /// A description of the transaction.
    pub title: String,
    /// The unsigned value of the transaction.
    pub amount: f64,
    /// Whether the amount is money coming in or going out.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// The response body for a created transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedTransaction {
    /// The ID of the new transaction.
    pub id: TransactionId,
}

/// A route handler for creating a new transaction, responds with 201 Created on success.
///
/// Clients without a session cookie are given a new session and the cookie
/// is set on the response.
pub async fn create_transaction_endpoint<L>(
    State(state): State<TransactionState<L>>,
    State(session_state): State<SessionState>,
    jar: PrivateCookieJar,
    Json(form): Json<TransactionForm>,
) -> Result<(StatusCode, PrivateCookieJar, Json<CreatedTransaction>), Error>
where
    L: LedgerStore + Clone + Send + Sync + 'static,
{
    let title = TransactionTitle::new(&form.title)?;
    let magnitude = Magnitude::new(form.amount)?;

    let existing_cookie = jar.get(COOKIE_SESSION_ID);
    let session = session::ensure(existing_cookie.as_ref().map(|cookie| cookie.value_trimmed()));

    let id = state.service.create(
        title,
        magnitude,
        form.transaction_type,
        session.session_id(),
    )?;

    let jar = if session.is_minted() {
        set_session_cookie(jar, session.session_id(), session_state.session_duration)
    } else {
        jar
    };

    Ok((StatusCode::CREATED, jar, Json(CreatedTransaction { id })))
}
